//! Redundancy Fill: after the main pass, force a small residual group on the
//! vehicle's **last** OD onto the vehicle, bounded by physical capacity.
//!
//! Runs only when the vehicle still has usable seats and the redundancy
//! threshold is enabled. With `remaining` waiting on the last OD:
//! - `remaining == 0` or `remaining > threshold` → no action;
//! - otherwise, if `remaining <= physical_remaining`, take all of it.
//!
//! `physical_remaining = total - (available - current) - reserved` is kept
//! literally: it may dip above the configured cap but never above the
//! vehicle's total seats. No partial fill, no log when it does not fit.

use alloc::format;

use fleet_core::{LogKind, SimulationLog, VehicleRule};

use crate::demand::DemandPool;
use crate::state::VehicleState;
use crate::steps;

/// Physical seats not yet used by passengers or crew.
#[inline]
pub fn physical_remaining(rule: &VehicleRule, current_seats: i64, reserved: u32) -> i64 {
    i64::from(rule.total_seats)
        - (i64::from(rule.available_seats) - current_seats)
        - i64::from(reserved)
}

/// Apply the fill; returns how many passengers were forced on (0 if none).
pub fn apply_redundancy_fill(state: &mut VehicleState<'_>, pool: &mut DemandPool) -> u32 {
    if !state.has_room() {
        return 0;
    }
    let Some(limit) = state.rule.redundancy_threshold.active() else {
        return 0;
    };
    let Some(last) = state.rule.last_od() else {
        return 0;
    };

    let remaining = pool.waiting(&last.id);
    let Ok(remaining) = i64::try_from(remaining) else {
        return 0;
    };
    if remaining == 0 || remaining > limit {
        return 0;
    }

    let room = physical_remaining(state.rule, state.current_seats, state.reservation.seats);
    if remaining > room {
        return 0;
    }

    // room never exceeds total_seats, so the drained count fits a seat count
    let Ok(taken) = u32::try_from(remaining) else {
        return 0;
    };
    pool.drain(&last.id);
    state.consume(taken);
    state.push(SimulationLog::new(
        steps::REDUNDANCY,
        format!(
            "forced the remaining {} passenger(s) of last OD [{}->{}] on board; physical seats left {}",
            taken,
            last.origin,
            last.destination,
            room - i64::from(taken)
        ),
        LogKind::Redundancy,
    ));
    taken
}
