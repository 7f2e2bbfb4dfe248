//! crates/fleet_core/src/outcome.rs
//! Decision logs and simulation results. Logs are observational only.

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ids::VehicleId;

/// Kind tag of one decision log entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LogKind {
    Info,
    Allocation,
    Skip,
    Full,
    Redundancy,
}

impl LogKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LogKind::Info => "info",
            LogKind::Allocation => "allocation",
            LogKind::Skip => "skip",
            LogKind::Full => "full",
            LogKind::Redundancy => "redundancy",
        }
    }
}

/// One append-only decision record.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimulationLog {
    pub step: String,
    pub details: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: LogKind,
}

impl SimulationLog {
    pub fn new(step: impl Into<String>, details: impl Into<String>, kind: LogKind) -> Self {
        Self { step: step.into(), details: details.into(), kind }
    }
}

/// Per-vehicle outcome, in processing order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct VehicleResult {
    pub vehicle_id: VehicleId,
    pub plate_number: String,
    pub allocated_passengers: u32,   // passengers only; crew seats excluded
    pub remaining_seats: u32,        // clamped at zero
    pub logs: Vec<SimulationLog>,
}

impl VehicleResult {
    /// True when a `full` status entry was recorded.
    pub fn is_full(&self) -> bool {
        self.logs.iter().any(|l| l.kind == LogKind::Full)
    }
}

/// Run-wide result.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SimulationResult {
    pub vehicle_results: Vec<VehicleResult>,
    pub unallocated_passengers: u64,
}

impl SimulationResult {
    pub fn total_allocated(&self) -> u64 {
        self.vehicle_results
            .iter()
            .map(|v| u64::from(v.allocated_passengers))
            .sum()
    }

    pub fn vehicle(&self, id: &VehicleId) -> Option<&VehicleResult> {
        self.vehicle_results.iter().find(|v| &v.vehicle_id == id)
    }
}
