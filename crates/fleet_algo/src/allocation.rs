//! Allocation Loop: one single pass over a vehicle's OD preference list.
//!
//! Per OD, in list order:
//! - stop the whole pass once the vehicle has no usable seats;
//! - nothing waiting → next OD, no log, no mutation;
//! - full-load skip: threshold enabled, `seats <= threshold` and
//!   `waiting > seats` → `skip` log, pool untouched, next OD;
//! - otherwise take `min(waiting, seats)` and log the `allocation`.
//!
//! Partial allocations are expected when seats run out; the full-load skip is
//! the only thing that prevents one.

use alloc::format;

use fleet_core::{LogKind, OdPair, SimulationLog};

use crate::demand::DemandPool;
use crate::state::VehicleState;
use crate::steps;

/// Outcome of considering one OD (exposed for audit tests).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OdDecision {
    /// Vehicle had no usable seats; the pass ended here.
    Stopped,
    /// Nothing was waiting on this OD.
    Empty,
    /// Full-load threshold kept the waiting group whole.
    Skipped { waiting: u64, seats: u32 },
    /// Passengers moved from the pool onto the vehicle.
    Allocated(u32),
}

/// Run the pass for one vehicle against the shared pool.
pub fn run_allocation_loop(state: &mut VehicleState<'_>, pool: &mut DemandPool) {
    let rule = state.rule;
    for od in &rule.od_priority_list {
        if consider_od(state, pool, od) == OdDecision::Stopped {
            break;
        }
    }
}

/// Apply the per-OD rule once.
pub fn consider_od(state: &mut VehicleState<'_>, pool: &mut DemandPool, od: &OdPair) -> OdDecision {
    if !state.has_room() {
        return OdDecision::Stopped;
    }

    let waiting = pool.waiting(&od.id);
    if waiting == 0 {
        return OdDecision::Empty;
    }

    let seats = state.usable_seats();
    if let Some(limit) = state.rule.full_load_threshold.active() {
        if i64::from(seats) <= limit && waiting > u64::from(seats) {
            state.push(SimulationLog::new(
                steps::FULL_LOAD_SKIP,
                format!(
                    "skipped OD [{}->{}]: waiting ({}) > remaining seats ({}) at full-load threshold {}; group kept whole",
                    od.origin, od.destination, waiting, seats, limit
                ),
                LogKind::Skip,
            ));
            return OdDecision::Skipped { waiting, seats };
        }
    }

    // `take` clamps to what is waiting, so this is min(waiting, seats).
    let taken = pool.take(&od.id, seats);
    state.consume(taken);
    state.push(SimulationLog::new(
        steps::ALLOCATION,
        format!(
            "accepted {} passenger(s) [{}->{}]; remaining seats {}",
            taken,
            od.origin,
            od.destination,
            state.usable_seats()
        ),
        LogKind::Allocation,
    ));
    OdDecision::Allocated(taken)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::{od, rule};
    use alloc::vec;
    use fleet_core::ThresholdConfig;

    #[test]
    fn allocates_in_list_order_with_partial_split() {
        let demand = vec![od("a", 7), od("b", 6)];
        let r = rule("v1", 10, 0, demand.clone());
        let mut pool = DemandPool::from_snapshot(&demand);
        let mut st = VehicleState::open(&r);
        run_allocation_loop(&mut st, &mut pool);

        assert_eq!(st.current_seats, 0);
        assert_eq!(pool.waiting(&"a".parse().unwrap()), 0);
        assert_eq!(pool.waiting(&"b".parse().unwrap()), 3);
        let kinds: vec::Vec<LogKind> = st.logs.iter().map(|l| l.kind).collect();
        assert_eq!(kinds, vec![LogKind::Info, LogKind::Info, LogKind::Allocation, LogKind::Allocation]);
        assert_eq!(st.logs[3].details, "accepted 3 passenger(s) [b-from->b-to]; remaining seats 0");
    }

    #[test]
    fn full_load_skip_keeps_group_whole() {
        let demand = vec![od("a", 8)];
        let mut r = rule("v1", 5, 0, demand.clone());
        r.full_load_threshold = ThresholdConfig::enabled(5);
        let mut pool = DemandPool::from_snapshot(&demand);
        let mut st = VehicleState::open(&r);
        run_allocation_loop(&mut st, &mut pool);

        assert_eq!(st.current_seats, 5);
        assert_eq!(pool.waiting(&"a".parse().unwrap()), 8);
        let last = st.logs.last().unwrap();
        assert_eq!(last.kind, LogKind::Skip);
        assert_eq!(last.step, steps::FULL_LOAD_SKIP);
    }

    #[test]
    fn skip_moves_on_to_a_group_that_fits() {
        let demand = vec![od("a", 8), od("b", 4)];
        let mut r = rule("v1", 5, 0, demand.clone());
        r.full_load_threshold = ThresholdConfig::enabled(5);
        let mut pool = DemandPool::from_snapshot(&demand);
        let mut st = VehicleState::open(&r);
        run_allocation_loop(&mut st, &mut pool);

        assert_eq!(st.current_seats, 1);
        assert_eq!(pool.waiting(&"a".parse().unwrap()), 8);
        assert_eq!(pool.waiting(&"b".parse().unwrap()), 0);
    }

    #[test]
    fn threshold_above_seats_does_not_block_fitting_groups() {
        let demand = vec![od("a", 3)];
        let mut r = rule("v1", 5, 0, demand.clone());
        r.full_load_threshold = ThresholdConfig::enabled(10);
        let mut pool = DemandPool::from_snapshot(&demand);
        let mut st = VehicleState::open(&r);
        assert_eq!(consider_od(&mut st, &mut pool, &demand[0]), OdDecision::Allocated(3));
    }

    #[test]
    fn disabled_threshold_allows_split() {
        let demand = vec![od("a", 8)];
        let mut r = rule("v1", 5, 0, demand.clone());
        r.full_load_threshold = ThresholdConfig { enabled: false, value: 5 };
        let mut pool = DemandPool::from_snapshot(&demand);
        let mut st = VehicleState::open(&r);
        run_allocation_loop(&mut st, &mut pool);
        assert_eq!(st.current_seats, 0);
        assert_eq!(pool.waiting(&"a".parse().unwrap()), 3);
    }

    #[test]
    fn empty_od_is_silent_and_full_vehicle_stops() {
        let demand = vec![od("a", 0), od("b", 2)];
        let r = rule("v1", 2, 0, vec![od("a", 0), od("b", 2), od("c", 9)]);
        let mut pool = DemandPool::from_snapshot(&demand);
        let mut st = VehicleState::open(&r);
        assert_eq!(consider_od(&mut st, &mut pool, &r.od_priority_list[0]), OdDecision::Empty);
        assert_eq!(st.logs.len(), 2);
        assert_eq!(consider_od(&mut st, &mut pool, &r.od_priority_list[1]), OdDecision::Allocated(2));
        assert_eq!(consider_od(&mut st, &mut pool, &r.od_priority_list[2]), OdDecision::Stopped);
    }

    #[test]
    fn negative_threshold_never_skips() {
        let demand = vec![od("a", 8)];
        let mut r = rule("v1", 5, 0, demand.clone());
        r.full_load_threshold = ThresholdConfig::enabled(-3);
        let mut pool = DemandPool::from_snapshot(&demand);
        let mut st = VehicleState::open(&r);
        run_allocation_loop(&mut st, &mut pool);
        assert_eq!(pool.waiting(&"a".parse().unwrap()), 3);
    }
}
