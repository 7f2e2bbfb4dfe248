//! Priority Ordering: the fixed processing order of the vehicle list.
//!
//! Descending `priority`; equal priorities keep their input order. The sort
//! must be stable because the tie order decides who gets scarce demand first.

use alloc::vec::Vec;

use fleet_core::determinism::sort_rules_by_priority;
use fleet_core::VehicleRule;

/// Borrow the rules in processing order. Pure; the input slice is untouched.
pub fn processing_order(rules: &[VehicleRule]) -> Vec<&VehicleRule> {
    let mut ordered: Vec<&VehicleRule> = rules.iter().collect();
    sort_rules_by_priority(&mut ordered);
    ordered
}
