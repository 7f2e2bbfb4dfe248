//! Determinism utilities: stable total orders for core tokens and the
//! priority comparator used to fix the vehicle processing order.
//!
//! This module is **I/O-free**. Every sort that feeds the engine must be
//! stable; ties keep their input order.

use core::cmp::Ordering;

use crate::entities::VehicleRule;
use crate::ids::{OdId, RuleId, VehicleId};

/* -------------------------------------------------------------------------- */
/*                               Stable Ordering                              */
/* -------------------------------------------------------------------------- */

/// Provide a **total**, stable order for values that must sort canonically.
pub trait StableOrd {
    fn stable_cmp(&self, other: &Self) -> Ordering;
}

macro_rules! lexical_stable_ord {
    ($($name:ty),+ $(,)?) => {
        $(
            impl StableOrd for $name {
                #[inline]
                fn stable_cmp(&self, other: &Self) -> Ordering {
                    self.as_str().cmp(other.as_str())
                }
            }
        )+
    };
}

lexical_stable_ord!(OdId, VehicleId, RuleId);

/* -------------------------------------------------------------------------- */
/*                              Priority ordering                             */
/* -------------------------------------------------------------------------- */

/// Higher `priority` first. Equal priorities compare `Equal` so that a stable
/// sort keeps their input order.
#[inline]
pub fn cmp_priority_desc(a: &VehicleRule, b: &VehicleRule) -> Ordering {
    b.priority.cmp(&a.priority)
}

/// Sort rules **in place** by descending priority (stable).
#[inline]
pub fn sort_rules_by_priority(rules: &mut [&VehicleRule]) {
    rules.sort_by(|a, b| cmp_priority_desc(a, b));
}

/* ---------------------------------- Tests --------------------------------- */
