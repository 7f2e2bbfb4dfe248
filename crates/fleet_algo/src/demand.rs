//! Demand Pool: remaining waiting passengers per OD, shared by every vehicle
//! of one run.
//!
//! Contract:
//! - Built once from the demand snapshot; never reset mid-run.
//! - Counts never go negative (`take` clamps to what is waiting).
//! - Entries sharing an OD id accumulate, so the pool total always equals the
//!   snapshot total.
//! - Unknown OD ids read as 0.

use alloc::collections::BTreeMap;

use fleet_core::{OdId, OdPair};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DemandPool {
    waiting: BTreeMap<OdId, u64>,
}

impl DemandPool {
    /// Copy the snapshot into a fresh pool. Inputs are not mutated.
    pub fn from_snapshot(demand: &[OdPair]) -> Self {
        let mut waiting: BTreeMap<OdId, u64> = BTreeMap::new();
        for od in demand {
            *waiting.entry(od.id.clone()).or_insert(0) += u64::from(od.demand());
        }
        Self { waiting }
    }

    /// Passengers still waiting on `od` (0 when unknown).
    #[inline]
    pub fn waiting(&self, od: &OdId) -> u64 {
        self.waiting.get(od).copied().unwrap_or(0)
    }

    /// Remove up to `count` passengers from `od`; returns how many were taken.
    pub fn take(&mut self, od: &OdId, count: u32) -> u32 {
        match self.waiting.get_mut(od) {
            Some(slot) => {
                let taken = count.min(u32::try_from(*slot).unwrap_or(u32::MAX));
                *slot -= u64::from(taken);
                taken
            }
            None => 0,
        }
    }

    /// Remove everything waiting on `od`; returns how many were taken.
    pub fn drain(&mut self, od: &OdId) -> u64 {
        match self.waiting.get_mut(od) {
            Some(slot) => core::mem::take(slot),
            None => 0,
        }
    }

    /// Sum of all remaining counts.
    pub fn total_waiting(&self) -> u64 {
        self.waiting.values().sum()
    }

    /// Remaining counts in `OdId` order.
    pub fn iter(&self) -> impl Iterator<Item = (&OdId, u64)> {
        self.waiting.iter().map(|(k, &v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }
}
