//! crates/fleet_pipeline/src/validate.rs
//! Advisory validation of a loaded scenario.
//!
//! The engine trusts its input; this pass only reports what the rule editor
//! should have caught. It never alters the scenario or the simulation.
//! Issues are sorted by (code, subject, message) so reports are byte-stable.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

use fleet_algo::reserve_captain_seats;
use fleet_core::{OdId, RuleId, VehicleId, VehicleRule};
use fleet_io::loader::Scenario;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// What an issue is about.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityRef {
    Rule { rule: RuleId },
    RuleOd { rule: RuleId, od: OdId },
    Demand { od: OdId },
    Vehicle { vehicle: VehicleId },
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityRef::Rule { rule } => write!(f, "rule {rule}"),
            EntityRef::RuleOd { rule, od } => write!(f, "rule {rule} / od {od}"),
            EntityRef::Demand { od } => write!(f, "demand {od}"),
            EntityRef::Vehicle { vehicle } => write!(f, "vehicle {vehicle}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub code: &'static str,
    pub message: String,
    #[serde(rename = "where")]
    pub where_: EntityRef,
}

/// pass = no error-severity issue.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub pass: bool,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn errors(&self) -> usize {
        self.issues.iter().filter(|i| i.severity == Severity::Error).count()
    }

    pub fn warnings(&self) -> usize {
        self.issues.iter().filter(|i| i.severity == Severity::Warning).count()
    }
}

pub mod codes {
    pub const CAP_EXCEEDS_TOTAL: &str = "seats.cap_exceeds_total";
    pub const RESERVATION_EXCEEDS_CAP: &str = "captain.reservation_exceeds_cap";
    pub const TEMP_WITHOUT_NAMES: &str = "captain.temp_enabled_without_names";
    pub const FIXED_WITHOUT_NAME: &str = "captain.fixed_without_name";
    pub const UNKNOWN_OD: &str = "od.unknown_in_priority_list";
    pub const DUPLICATE_OD: &str = "od.duplicate_in_priority_list";
    pub const DUPLICATE_DEMAND: &str = "demand.duplicate_id";
    pub const DUPLICATE_VEHICLE: &str = "rules.duplicate_vehicle";
    pub const NEGATIVE_THRESHOLD: &str = "threshold.negative_value";
}

fn warning(code: &'static str, where_: EntityRef, message: String) -> ValidationIssue {
    ValidationIssue { severity: Severity::Warning, code, message, where_ }
}

/// Top-level entry point.
pub fn validate(scenario: &Scenario) -> ValidationReport {
    let mut issues = Vec::new();

    let demand_ids = check_demand(scenario, &mut issues);
    for rule in &scenario.rules {
        check_seats(rule, &mut issues);
        check_thresholds(rule, &mut issues);
        check_captains(rule, &mut issues);
        check_od_list(rule, &demand_ids, &mut issues);
    }
    check_vehicles(&scenario.rules, &mut issues);

    issues.sort_by(|a, b| {
        a.code
            .cmp(b.code)
            .then_with(|| a.where_.cmp(&b.where_))
            .then_with(|| a.message.cmp(&b.message))
    });

    ValidationReport {
        pass: !issues.iter().any(|i| i.severity == Severity::Error),
        issues,
    }
}

/// Returns the set of OD ids present in the snapshot.
fn check_demand(scenario: &Scenario, issues: &mut Vec<ValidationIssue>) -> BTreeSet<OdId> {
    let mut seen: BTreeMap<&OdId, usize> = BTreeMap::new();
    for od in &scenario.demand {
        *seen.entry(&od.id).or_default() += 1;
    }
    for (id, n) in &seen {
        if *n > 1 {
            issues.push(warning(
                codes::DUPLICATE_DEMAND,
                EntityRef::Demand { od: (*id).clone() },
                format!("OD {id} appears {n} times in the demand snapshot; counts are summed"),
            ));
        }
    }
    seen.into_keys().cloned().collect()
}

fn check_seats(rule: &VehicleRule, issues: &mut Vec<ValidationIssue>) {
    if rule.available_seats > rule.total_seats {
        issues.push(warning(
            codes::CAP_EXCEEDS_TOTAL,
            EntityRef::Rule { rule: rule.id.clone() },
            format!(
                "available seats ({}) exceed total seats ({})",
                rule.available_seats, rule.total_seats
            ),
        ));
    }
}

fn check_thresholds(rule: &VehicleRule, issues: &mut Vec<ValidationIssue>) {
    let named = [
        ("full-load", rule.full_load_threshold),
        ("redundancy", rule.redundancy_threshold),
    ];
    for (label, t) in named {
        if let Some(v) = t.active().filter(|v| *v < 0) {
            issues.push(warning(
                codes::NEGATIVE_THRESHOLD,
                EntityRef::Rule { rule: rule.id.clone() },
                format!("{label} threshold is negative ({v}); applied as written"),
            ));
        }
    }
}

fn check_captains(rule: &VehicleRule, issues: &mut Vec<ValidationIssue>) {
    let at = || EntityRef::Rule { rule: rule.id.clone() };

    let reserved = reserve_captain_seats(rule).seats;
    if reserved > rule.available_seats {
        issues.push(warning(
            codes::RESERVATION_EXCEEDS_CAP,
            at(),
            format!(
                "captain reservation ({reserved}) exceeds available seats ({})",
                rule.available_seats
            ),
        ));
    }
    if rule.enable_temp_captain && rule.temp_captain_names.is_empty() {
        issues.push(warning(
            codes::TEMP_WITHOUT_NAMES,
            at(),
            "temporary captains enabled but no names given; setting ignored".to_string(),
        ));
    }
    let named = rule.fixed_captain_name.as_deref().is_some_and(|n| !n.trim().is_empty());
    if rule.has_fixed_captain && !named {
        issues.push(warning(
            codes::FIXED_WITHOUT_NAME,
            at(),
            "fixed captain flagged without a name".to_string(),
        ));
    }
}

fn check_od_list(rule: &VehicleRule, demand_ids: &BTreeSet<OdId>, issues: &mut Vec<ValidationIssue>) {
    let mut seen: BTreeSet<&OdId> = BTreeSet::new();
    let mut reported: BTreeSet<&OdId> = BTreeSet::new();
    for od in &rule.od_priority_list {
        let at = EntityRef::RuleOd { rule: rule.id.clone(), od: od.id.clone() };
        if !seen.insert(&od.id) {
            if reported.insert(&od.id) {
                issues.push(warning(
                    codes::DUPLICATE_OD,
                    at,
                    format!("OD {} listed more than once", od.id),
                ));
            }
            continue;
        }
        if !demand_ids.contains(&od.id) {
            issues.push(warning(
                codes::UNKNOWN_OD,
                at,
                format!("OD {} is not in the demand snapshot", od.id),
            ));
        }
    }
}

fn check_vehicles(rules: &[VehicleRule], issues: &mut Vec<ValidationIssue>) {
    let mut by_vehicle: BTreeMap<&VehicleId, Vec<&RuleId>> = BTreeMap::new();
    for r in rules {
        by_vehicle.entry(&r.vehicle_id).or_default().push(&r.id);
    }
    for (vehicle, rule_ids) in by_vehicle {
        if rule_ids.len() > 1 {
            let listed: Vec<&str> = rule_ids.iter().map(|r| r.as_str()).collect();
            issues.push(ValidationIssue {
                severity: Severity::Error,
                code: codes::DUPLICATE_VEHICLE,
                message: format!("vehicle {vehicle} is bound by rules {}", listed.join(", ")),
                where_: EntityRef::Vehicle { vehicle: vehicle.clone() },
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleet_core::{OdPair, ThresholdConfig};

    fn od(id: &str, demand: u32) -> OdPair {
        OdPair {
            id: id.parse().unwrap(),
            origin: "A".into(),
            destination: "B".into(),
            estimated_demand: Some(demand),
        }
    }

    fn rule(id: &str, vehicle: &str, ods: Vec<OdPair>) -> VehicleRule {
        VehicleRule {
            id: id.parse().unwrap(),
            vehicle_id: vehicle.parse().unwrap(),
            plate_number: format!("P-{vehicle}"),
            organization: String::new(),
            driver_name: String::new(),
            total_seats: 10,
            available_seats: 10,
            has_fixed_captain: false,
            fixed_captain_name: None,
            enable_temp_captain: false,
            temp_captain_names: Vec::new(),
            priority: 0,
            full_load_threshold: ThresholdConfig::disabled(),
            redundancy_threshold: ThresholdConfig::disabled(),
            od_priority_list: ods,
        }
    }

    fn codes_of(r: &ValidationReport) -> Vec<&'static str> {
        r.issues.iter().map(|i| i.code).collect()
    }

    #[test]
    fn clean_scenario_passes() {
        let s = Scenario {
            route: None,
            rules: vec![rule("r1", "VH-1", vec![od("a", 0)])],
            demand: vec![od("a", 4)],
        };
        let rep = validate(&s);
        assert!(rep.pass);
        assert!(rep.issues.is_empty());
    }

    #[test]
    fn editor_slips_are_warnings_sorted_by_code() {
        let mut r = rule("r1", "VH-1", vec![od("a", 0), od("zz", 0), od("a", 0)]);
        r.available_seats = 12;
        r.has_fixed_captain = true;
        r.enable_temp_captain = true;
        let s = Scenario { route: None, rules: vec![r], demand: vec![od("a", 1), od("a", 2)] };

        let rep = validate(&s);
        assert!(rep.pass);
        assert_eq!(
            codes_of(&rep),
            vec![
                codes::FIXED_WITHOUT_NAME,
                codes::TEMP_WITHOUT_NAMES,
                codes::DUPLICATE_DEMAND,
                codes::DUPLICATE_OD,
                codes::UNKNOWN_OD,
                codes::CAP_EXCEEDS_TOTAL,
            ]
        );
        assert_eq!(rep.warnings(), 6);
    }

    #[test]
    fn over_reservation_is_reported() {
        let mut r = rule("r1", "VH-1", vec![]);
        r.available_seats = 1;
        r.enable_temp_captain = true;
        r.temp_captain_names = vec!["A".into(), "B".into()];
        let rep = validate(&Scenario { route: None, rules: vec![r], demand: vec![] });
        assert_eq!(codes_of(&rep), vec![codes::RESERVATION_EXCEEDS_CAP]);
    }

    #[test]
    fn negative_thresholds_warn_only_when_enabled() {
        let mut r = rule("r1", "VH-1", vec![]);
        r.full_load_threshold = ThresholdConfig::enabled(-1);
        r.redundancy_threshold = ThresholdConfig { enabled: false, value: -5 };
        let rep = validate(&Scenario { route: None, rules: vec![r], demand: vec![] });
        assert!(rep.pass);
        assert_eq!(codes_of(&rep), vec![codes::NEGATIVE_THRESHOLD]);
        assert_eq!(rep.issues[0].message, "full-load threshold is negative (-1); applied as written");
    }

    #[test]
    fn shared_vehicle_is_an_error() {
        let s = Scenario {
            route: None,
            rules: vec![rule("r1", "VH-1", vec![]), rule("r2", "VH-1", vec![])],
            demand: vec![],
        };
        let rep = validate(&s);
        assert!(!rep.pass);
        assert_eq!(rep.errors(), 1);
        assert_eq!(rep.issues[0].message, "vehicle VH-1 is bound by rules r1, r2");
        assert_eq!(rep.issues[0].where_.to_string(), "vehicle VH-1");
    }
}
