//! fleet_core: Core types, captain policy, decision logs and stable ordering.
//!
//! This crate is **I/O-free**. It defines the stable types shared across the
//! workspace (`fleet_io`, `fleet_algo`, `fleet_pipeline`, `fleet_report`, `fleet_cli`).
//!
//! - Token ids: `OdId`, `VehicleId`, `RuleId`, `RouteId`
//! - Digest ids: `Sha256`, `ResultId` (`RES:` + 64-hex)
//! - Inputs: `OdPair`, `ThresholdConfig`, `VehicleRule`, `Route`, `ShiftProfile`
//! - Resolved crew policy: `CaptainPolicy`
//! - Outputs: `SimulationLog`, `VehicleResult`, `SimulationResult`
//!
//! Serialization derives are gated behind the `serde` feature and follow the
//! rule editor's camelCase field names.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod errors {
    use core::fmt;

    /// Minimal error set for core-domain parsing.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub enum CoreError {
        NonAscii,
        TooLong,
        BadShape,
    }

    impl fmt::Display for CoreError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                CoreError::NonAscii => write!(f, "id must be ASCII without NUL"),
                CoreError::TooLong => write!(f, "id too long"),
                CoreError::BadShape => write!(f, "id has an invalid shape"),
            }
        }
    }

    #[cfg(feature = "std")]
    impl std::error::Error for CoreError {}
}

pub mod determinism;
pub mod entities;
pub mod ids;
pub mod outcome;

pub use entities::{CaptainPolicy, OdPair, Route, RouteInfo, ShiftProfile, ShiftType, ThresholdConfig, VehicleRule};
pub use errors::CoreError;
pub use ids::{OdId, ResultId, RouteId, RuleId, Sha256, VehicleId};
pub use outcome::{LogKind, SimulationLog, SimulationResult, VehicleResult};
