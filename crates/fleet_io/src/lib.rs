//! crates/fleet_io/src/lib.rs
//! Local-file I/O for the allocation engine.
//!
//! - Shared error type (`IoError`) with `From` conversions used across modules.
//! - Strict offline posture: any `<scheme>://` path is rejected.
//! - Canonical JSON + SHA-256 give byte-stable artifacts and ids.

#![forbid(unsafe_code)]

use thiserror::Error;

pub mod canonical_json;
pub mod hasher;
pub mod loader;
pub mod manifest;

/// Unified error for fleet_io.
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem / path errors (open, create_dir_all, rename, …).
    #[error("io/path error: {0}")]
    Path(String),

    /// JSON (de)serialization errors; `pointer` names the location when known.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    /// Digest or id construction failures.
    #[error("hash error: {0}")]
    Hash(String),

    /// Inputs that parse but cannot be used (unknown route, URL path, …).
    #[error("invalid: {0}")]
    Invalid(String),
}

pub type IoResult<T> = Result<T, IoError>;

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Path(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json keeps line/column, not a pointer; default to root.
        IoError::Json {
            pointer: "/".to_string(),
            msg: e.to_string(),
        }
    }
}

/// Returns true if `s` looks like a URL (any `<scheme>://`, including `file://`).
#[inline]
pub fn looks_like_url_strict(s: &str) -> bool {
    s.trim().contains("://")
}

pub mod prelude {
    pub use crate::{looks_like_url_strict, IoError, IoResult};

    pub use crate::canonical_json::{to_canonical_bytes, write_canonical_file};
    pub use crate::hasher::{res_id_from_canonical, sha256_canonical, sha256_hex};
    pub use crate::loader::{
        load_demand, load_scenario, load_shift, load_source, scenario_from_shift, InputSource, Scenario,
    };
    pub use crate::manifest::{load_manifest, resolve_paths, ResolvedManifest, RunManifest};
}
