//! crates/fleet_pipeline/src/build_run_record.rs
//!
//! `run_record.json`: provenance of one run.
//! - Engine meta is recorded verbatim (vendor/name/version/build).
//! - `inputs.inputs_sha256` covers the canonical rules+demand snapshot only;
//!   the route header and file layout do not affect it.
//! - Run id = `RUN:<timestamp>:<sha256 of the canonical record without id>`.
//! - The timestamp is a fixed placeholder unless the caller passes one, so
//!   identical inputs give byte-identical records.

use serde::{Deserialize, Serialize};

use fleet_core::{ResultId, RouteId, Sha256};
use fleet_io::hasher;

use crate::validate::ValidationReport;
use crate::{EngineMeta, PipelineError};

pub const PLACEHOLDER_TIMESTAMP: &str = "1970-01-01T00:00:00Z";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRecordDoc {
    pub id: String,
    pub timestamp_utc: String,
    pub engine: EngineMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_id: Option<RouteId>,
    pub inputs: RunInputs,
    pub validation: ValidationSummary,
    pub outputs: RunOutputs,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunInputs {
    pub inputs_sha256: Sha256,
    pub vehicle_rules: u32,
    pub od_pairs: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub errors: u32,
    pub warnings: u32,
}

impl From<&ValidationReport> for ValidationSummary {
    fn from(r: &ValidationReport) -> Self {
        Self {
            errors: u32::try_from(r.errors()).unwrap_or(u32::MAX),
            warnings: u32::try_from(r.warnings()).unwrap_or(u32::MAX),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutputs {
    pub result_id: ResultId,
    pub result_sha256: Sha256,
    pub vehicles_processed: u32,
    pub total_allocated: u64,
    pub unallocated_passengers: u64,
}

/// Everything the record needs besides the engine meta.
#[derive(Debug, Clone)]
pub struct RunFacts<'a> {
    pub timestamp_utc: Option<&'a str>,
    pub route_id: Option<&'a RouteId>,
    pub inputs: RunInputs,
    pub validation: ValidationSummary,
    pub outputs: RunOutputs,
}

#[derive(Serialize)]
struct RunNoId<'a> {
    timestamp_utc: &'a str,
    engine: &'a EngineMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    route_id: Option<&'a RouteId>,
    inputs: &'a RunInputs,
    validation: &'a ValidationSummary,
    outputs: &'a RunOutputs,
}

pub fn build_run_record(engine: &EngineMeta, facts: RunFacts<'_>) -> Result<RunRecordDoc, PipelineError> {
    let timestamp = hasher::normalize_rfc3339_utc_seconds(facts.timestamp_utc.unwrap_or(PLACEHOLDER_TIMESTAMP))?;

    let body = RunNoId {
        timestamp_utc: &timestamp,
        engine,
        route_id: facts.route_id,
        inputs: &facts.inputs,
        validation: &facts.validation,
        outputs: &facts.outputs,
    };
    let id = hasher::run_id_from_canonical(&timestamp, &body)?;

    Ok(RunRecordDoc {
        id,
        timestamp_utc: timestamp,
        engine: engine.clone(),
        route_id: facts.route_id.cloned(),
        inputs: facts.inputs,
        validation: facts.validation,
        outputs: facts.outputs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_identifiers;

    const HEX: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    fn facts(ts: Option<&str>) -> RunFacts<'_> {
        let sha: Sha256 = HEX.parse().unwrap();
        RunFacts {
            timestamp_utc: ts,
            route_id: None,
            inputs: RunInputs { inputs_sha256: sha.clone(), vehicle_rules: 2, od_pairs: 3 },
            validation: ValidationSummary { errors: 0, warnings: 1 },
            outputs: RunOutputs {
                result_id: ResultId::from_digest(&sha),
                result_sha256: sha,
                vehicles_processed: 2,
                total_allocated: 10,
                unallocated_passengers: 0,
            },
        }
    }

    #[test]
    fn placeholder_timestamp_is_deterministic() {
        let meta = engine_identifiers();
        let a = build_run_record(&meta, facts(None)).unwrap();
        let b = build_run_record(&meta, facts(None)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.timestamp_utc, PLACEHOLDER_TIMESTAMP);
        assert!(a.id.starts_with("RUN:1970-01-01T00:00:00Z:"));
    }

    #[test]
    fn supplied_timestamp_is_normalized_and_changes_the_id() {
        let meta = engine_identifiers();
        let a = build_run_record(&meta, facts(None)).unwrap();
        let b = build_run_record(&meta, facts(Some("2025-03-01T06:30:00.250Z"))).unwrap();
        assert_eq!(b.timestamp_utc, "2025-03-01T06:30:00Z");
        assert_ne!(a.id, b.id);
        assert!(build_run_record(&meta, facts(Some("yesterday"))).is_err());
    }
}
