//! fleet_report: pure offline report model + renderers (text, JSON, HTML).
//!
//! Determinism rules:
//! - No I/O here. Callers pass results already in memory.
//! - No recomputation: every number comes from the `SimulationResult`.
//! - Stable section order and field names.

#![deny(unsafe_code)]

use thiserror::Error;

pub mod render_text;
#[cfg(feature = "render_json")]
pub mod render_json;
#[cfg(feature = "render_html")]
pub mod render_html;
pub mod structure;

pub use render_text::render_text;
#[cfg(feature = "render_json")]
pub use render_json::render_json;
#[cfg(feature = "render_html")]
pub use render_html::render_html;
pub use structure::{build_model, IntegrityBlock, LogLine, ReportModel, Summary, VehicleSection};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("serialization failed: {0}")]
    Serialize(String),
}
