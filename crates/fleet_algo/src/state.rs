//! Seat state of one vehicle while it is being loaded.
//!
//! `current_seats` starts at `available_seats - reserved` and may be nominally
//! negative when the reservation exceeds the cap. Allocation only ever sees
//! `usable_seats()`, which clamps at zero.

use alloc::format;
use alloc::vec::Vec;

use fleet_core::{LogKind, SimulationLog, VehicleRule};

use crate::reservation::{reservation_log, reserve_captain_seats, Reservation};
use crate::steps;

#[derive(Clone, Debug)]
pub struct VehicleState<'r> {
    pub rule: &'r VehicleRule,
    pub reservation: Reservation,
    pub current_seats: i64,
    pub logs: Vec<SimulationLog>,
}

impl<'r> VehicleState<'r> {
    /// Open a vehicle: record its cap, apply the crew reservation once.
    pub fn open(rule: &'r VehicleRule) -> Self {
        let mut logs = Vec::new();
        logs.push(SimulationLog::new(
            steps::INIT,
            format!(
                "vehicle {} starts with {} available seat(s) of {} total",
                rule.plate_number, rule.available_seats, rule.total_seats
            ),
            LogKind::Info,
        ));

        let reservation = reserve_captain_seats(rule);
        let current_seats = i64::from(rule.available_seats) - i64::from(reservation.seats);
        let mut state = Self { rule, reservation, current_seats, logs };
        let log = reservation_log(&state.reservation, state.usable_seats());
        state.logs.push(log);
        state
    }

    /// Seats that can still take passengers (never negative).
    #[inline]
    pub fn usable_seats(&self) -> u32 {
        u32::try_from(self.current_seats.max(0)).unwrap_or(u32::MAX)
    }

    #[inline]
    pub fn has_room(&self) -> bool {
        self.current_seats > 0
    }

    /// Consume `count` seats (may drive the nominal value below zero only via
    /// redundancy fill, which is bounded by physical capacity).
    #[inline]
    pub(crate) fn consume(&mut self, count: u32) {
        self.current_seats -= i64::from(count);
    }

    #[inline]
    pub(crate) fn push(&mut self, log: SimulationLog) {
        self.logs.push(log);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::rule;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn open_applies_reservation_once() {
        let mut r = rule("v1", 10, 0, vec![]);
        r.has_fixed_captain = true;
        let st = VehicleState::open(&r);
        assert_eq!(st.current_seats, 9);
        assert_eq!(st.usable_seats(), 9);
        assert_eq!(st.logs.len(), 2);
        assert_eq!(st.logs[0].step, steps::INIT);
        assert_eq!(st.logs[0].details, "vehicle P-v1 starts with 10 available seat(s) of 10 total");
        assert_eq!(st.logs[1].step, steps::CAPTAIN);
    }

    #[test]
    fn over_reservation_clamps_usable_seats() {
        let mut r = rule("v1", 2, 0, vec![]);
        r.enable_temp_captain = true;
        r.temp_captain_names = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let st = VehicleState::open(&r);
        assert_eq!(st.current_seats, -1);
        assert_eq!(st.usable_seats(), 0);
        assert!(!st.has_room());
        assert!(st.logs[1].details.ends_with("remaining 0"));
    }
}
