//! Result Aggregator: per-vehicle counts and the run-wide unallocated total.
//!
//! - `allocated = (available - reserved) - current` (passengers only);
//! - `remaining = max(current, 0)`;
//! - a `full` status log is appended when `current <= 0`;
//! - `unallocated` sums what is still waiting in the pool.

use alloc::vec::Vec;

use fleet_core::{LogKind, SimulationLog, SimulationResult, VehicleResult};

use crate::demand::DemandPool;
use crate::state::VehicleState;
use crate::steps;

/// Close one vehicle and turn its state into a result record.
pub fn finish_vehicle(mut state: VehicleState<'_>) -> VehicleResult {
    let rule = state.rule;
    let passenger_cap = i64::from(rule.available_seats) - i64::from(state.reservation.seats);
    let allocated = (passenger_cap - state.current_seats).max(0);

    if state.current_seats <= 0 {
        state.push(SimulationLog::new(steps::STATUS, "vehicle fully loaded", LogKind::Full));
    }

    VehicleResult {
        vehicle_id: rule.vehicle_id.clone(),
        plate_number: rule.plate_number.clone(),
        allocated_passengers: u32::try_from(allocated).unwrap_or(u32::MAX),
        remaining_seats: state.usable_seats(),
        logs: state.logs,
    }
}

/// Assemble the run result once every vehicle has been processed.
pub fn aggregate(vehicle_results: Vec<VehicleResult>, pool: &DemandPool) -> SimulationResult {
    SimulationResult {
        vehicle_results,
        unallocated_passengers: pool.total_waiting(),
    }
}
