//! crates/fleet_core/src/entities.rs
//! Input entities as the rule editor persists them, plus the resolved crew policy.
//!
//! Notes:
//! - `VehicleRule` keeps the editor's independent captain flags verbatim. Engine code
//!   never branches on them directly; it resolves a `CaptainPolicy` once per vehicle.
//! - `available_seats <= total_seats` is **not** enforced here (editor's job).
//! - Threshold values are signed so malformed (negative) values still load.

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ids::{OdId, RouteId, RuleId, VehicleId};

/* -------------------------------------------------------------------------- */
/*                                  Demand                                    */
/* -------------------------------------------------------------------------- */

/// One origin-destination flow. `estimated_demand` absent means 0.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct OdPair {
    pub id: OdId,
    pub origin: String,
    pub destination: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub estimated_demand: Option<u32>,
}

impl OdPair {
    /// Waiting passengers for this flow (`None` counts as 0).
    #[inline]
    pub fn demand(&self) -> u32 {
        self.estimated_demand.unwrap_or(0)
    }
}

/* -------------------------------------------------------------------------- */
/*                                 Thresholds                                 */
/* -------------------------------------------------------------------------- */

/// Toggle + value. Seats for the full-load threshold, passengers for redundancy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ThresholdConfig {
    pub enabled: bool,
    pub value: i64,
}

impl ThresholdConfig {
    pub const fn enabled(value: i64) -> Self {
        Self { enabled: true, value }
    }

    pub const fn disabled() -> Self {
        Self { enabled: false, value: 0 }
    }

    /// The value when the toggle is on.
    #[inline]
    pub fn active(&self) -> Option<i64> {
        self.enabled.then_some(self.value)
    }
}

/* -------------------------------------------------------------------------- */
/*                                Vehicle rule                                */
/* -------------------------------------------------------------------------- */

/// A scheduling rule binding one vehicle to a route.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct VehicleRule {
    pub id: RuleId,
    pub vehicle_id: VehicleId,
    pub plate_number: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub organization: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub driver_name: String,
    pub total_seats: u32,
    pub available_seats: u32,                       // configured cap; editor keeps it <= total_seats

    #[cfg_attr(feature = "serde", serde(default))]
    pub has_fixed_captain: bool,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub fixed_captain_name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub enable_temp_captain: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub temp_captain_names: Vec<String>,

    pub priority: i64,                              // higher is processed first
    #[cfg_attr(feature = "serde", serde(default))]
    pub full_load_threshold: ThresholdConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    pub redundancy_threshold: ThresholdConfig,

    /// Preference order for accepting demand; order is meaningful.
    #[cfg_attr(feature = "serde", serde(default))]
    pub od_priority_list: Vec<OdPair>,
}

impl VehicleRule {
    /// Last entry of the OD preference list (the "bottom of route").
    #[inline]
    pub fn last_od(&self) -> Option<&OdPair> {
        self.od_priority_list.last()
    }
}

/* -------------------------------------------------------------------------- */
/*                               Captain policy                               */
/* -------------------------------------------------------------------------- */

/// Crew seats withheld from passengers, resolved from the rule's flags.
///
/// `Temporary` always carries at least one name.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "crew", rename_all = "snake_case"))]
pub enum CaptainPolicy {
    None,
    Fixed(Option<String>),
    Temporary(Vec<String>),
}

impl CaptainPolicy {
    /// Seats this policy withholds from passenger allocation.
    pub fn seat_count(&self) -> u32 {
        match self {
            CaptainPolicy::None => 0,
            CaptainPolicy::Fixed(_) => 1,
            CaptainPolicy::Temporary(names) => u32::try_from(names.len()).unwrap_or(u32::MAX),
        }
    }

    /// Stable wire token.
    pub fn as_str(&self) -> &'static str {
        match self {
            CaptainPolicy::None => "none",
            CaptainPolicy::Fixed(_) => "fixed",
            CaptainPolicy::Temporary(_) => "temporary",
        }
    }
}

/* -------------------------------------------------------------------------- */
/*                              Routes and shifts                             */
/* -------------------------------------------------------------------------- */

/// Route header without its rules (echoed into run records).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RouteInfo {
    pub id: RouteId,
    pub name: String,
    pub origin: String,
    pub destination: String,
}

/// A route and the vehicle rules that serve it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Route {
    pub id: RouteId,
    pub name: String,
    pub origin: String,
    pub destination: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rules: Vec<VehicleRule>,
}

impl Route {
    pub fn info(&self) -> RouteInfo {
        RouteInfo {
            id: self.id.clone(),
            name: self.name.clone(),
            origin: self.origin.clone(),
            destination: self.destination.clone(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ShiftType {
    Morning,
    Evening,
    Night,
}

/// A shift and its routes, as edited in the shift list.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ShiftProfile {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub shift_type: ShiftType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub organization: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub operating_time: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub date_range: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub booking_open_time: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub booking_deadline: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub routes: Vec<Route>,
}

impl ShiftProfile {
    pub fn route(&self, id: &RouteId) -> Option<&Route> {
        self.routes.iter().find(|r| &r.id == id)
    }
}

/* ---------------------------------- Tests --------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn missing_demand_counts_as_zero() {
        let od = OdPair {
            id: "od1".parse().unwrap(),
            origin: "A".to_string(),
            destination: "B".to_string(),
            estimated_demand: None,
        };
        assert_eq!(od.demand(), 0);
    }

    #[test]
    fn threshold_active_only_when_enabled() {
        assert_eq!(ThresholdConfig::enabled(5).active(), Some(5));
        assert_eq!(ThresholdConfig { enabled: false, value: 5 }.active(), None);
        assert_eq!(ThresholdConfig::default(), ThresholdConfig::disabled());
    }

    #[test]
    fn captain_seat_counts() {
        assert_eq!(CaptainPolicy::None.seat_count(), 0);
        assert_eq!(CaptainPolicy::Fixed(None).seat_count(), 1);
        let temp = CaptainPolicy::Temporary(vec!["A".to_string(), "B".to_string()]);
        assert_eq!(temp.seat_count(), 2);
        assert_eq!(temp.as_str(), "temporary");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn rule_reads_editor_wire_shape() {
        let raw = r#"{
            "id": "v2", "vehicleId": "VH-002", "plateNumber": "京A-66666",
            "totalSeats": 30, "availableSeats": 30, "priority": 90,
            "fullLoadThreshold": {"enabled": false, "value": 5},
            "odPriorityList": [{"id": "od1", "origin": "A", "destination": "B", "estimatedDemand": 45}]
        }"#;
        let rule: VehicleRule = serde_json::from_str(raw).unwrap();
        assert_eq!(rule.vehicle_id.as_str(), "VH-002");
        assert!(!rule.has_fixed_captain);
        assert!(rule.temp_captain_names.is_empty());
        assert_eq!(rule.redundancy_threshold, ThresholdConfig::disabled());
        assert_eq!(rule.last_od().map(OdPair::demand), Some(45));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn shift_type_uses_type_key() {
        let raw = r#"{"id": "s1", "name": "early", "type": "Morning", "routes": []}"#;
        let shift: ShiftProfile = serde_json::from_str(raw).unwrap();
        assert_eq!(shift.shift_type, ShiftType::Morning);
    }
}
