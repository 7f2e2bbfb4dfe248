// crates/fleet_algo/src/lib.rs
//! Allocation engine for one route and one invocation.
//!
//! Flow: `ordering` runs once; then for each vehicle, in that order,
//! `reservation` → `allocation` → `redundancy` run against one shared
//! `DemandPool`; `aggregate` assembles the result after the last vehicle.
//!
//! Everything here is pure and synchronous. Vehicles are processed strictly one
//! at a time: later vehicles observe what earlier ones consumed.
#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod aggregate;
pub mod allocation;
pub mod demand;
pub mod engine;
pub mod ordering;
pub mod redundancy;
pub mod reservation;
pub mod state;

pub use demand::DemandPool;
pub use engine::simulate;
pub use ordering::processing_order;
pub use reservation::{reserve_captain_seats, resolve_captain_policy, Reservation};
pub use state::VehicleState;

/// Step labels written into decision logs (stable wire tokens).
pub mod steps {
    pub const INIT: &str = "init";
    pub const CAPTAIN: &str = "captain reservation";
    pub const ALLOCATION: &str = "allocation";
    pub const FULL_LOAD_SKIP: &str = "full-load skip";
    pub const REDUNDANCY: &str = "redundancy fill";
    pub const STATUS: &str = "status";
}
