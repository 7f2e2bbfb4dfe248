//! Reservation Calculator: crew seats withheld before any OD allocation.
//!
//! Precedence, evaluated in this order:
//! 1. temporary captains enabled with at least one name → one seat per name;
//! 2. otherwise a fixed captain → one seat;
//! 3. otherwise nothing.
//!
//! Temporary captains replace the fixed captain; the fixed seat is never
//! reserved on top of them.

use alloc::format;
use alloc::string::String;

use fleet_core::{CaptainPolicy, LogKind, SimulationLog, VehicleRule};

use crate::steps;

/// Seats withheld for crew and the policy that produced them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reservation {
    pub seats: u32,
    pub policy: CaptainPolicy,
}

/// Resolve the rule's independent captain flags into one policy.
pub fn resolve_captain_policy(rule: &VehicleRule) -> CaptainPolicy {
    if rule.enable_temp_captain && !rule.temp_captain_names.is_empty() {
        CaptainPolicy::Temporary(rule.temp_captain_names.clone())
    } else if rule.has_fixed_captain {
        CaptainPolicy::Fixed(rule.fixed_captain_name.clone())
    } else {
        CaptainPolicy::None
    }
}

/// Compute the reservation for one vehicle.
pub fn reserve_captain_seats(rule: &VehicleRule) -> Reservation {
    let policy = resolve_captain_policy(rule);
    Reservation { seats: policy.seat_count(), policy }
}

/// Decision log for the applied policy; `usable` is seats left after reservation.
pub(crate) fn reservation_log(reservation: &Reservation, usable: u32) -> SimulationLog {
    let details: String = match &reservation.policy {
        CaptainPolicy::Temporary(names) => format!(
            "{} temporary captain(s) enabled: {}; reserved {} seat(s); remaining {}",
            names.len(),
            names.join(", "),
            reservation.seats,
            usable
        ),
        CaptainPolicy::Fixed(name) => format!(
            "fixed captain {}; reserved 1 seat; remaining {}",
            name.as_deref().unwrap_or("(unnamed)"),
            usable
        ),
        CaptainPolicy::None => format!("no captain seat reserved; remaining {usable}"),
    };
    SimulationLog::new(steps::CAPTAIN, details, LogKind::Info)
}
