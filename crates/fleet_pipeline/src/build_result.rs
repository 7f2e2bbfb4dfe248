//! crates/fleet_pipeline/src/build_result.rs
//! Wrap a `SimulationResult` into the `result.json` document.
//!
//! The id is `RES:` + SHA-256 of the canonical document *without* its id, so
//! identical inputs always produce the same id and bytes.

use serde::{Deserialize, Serialize};

use fleet_core::{ResultId, RouteId, SimulationResult};
use fleet_io::{canonical_json, hasher};

use crate::PipelineError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultDoc {
    pub id: ResultId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_id: Option<RouteId>,
    #[serde(flatten)]
    pub simulation: SimulationResult,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResultNoId<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    route_id: Option<&'a RouteId>,
    #[serde(flatten)]
    simulation: &'a SimulationResult,
}

/// Result document plus the SHA-256 of its canonical id-less payload.
pub fn build_result(
    route_id: Option<&RouteId>,
    simulation: SimulationResult,
) -> Result<(ResultDoc, fleet_core::Sha256), PipelineError> {
    let body = ResultNoId { route_id, simulation: &simulation };
    let bytes = canonical_json::to_canonical_bytes(&body)?;
    let sha: fleet_core::Sha256 = hasher::sha256_hex(&bytes)
        .parse()
        .map_err(|e| PipelineError::Build(format!("result digest: {e}")))?;

    Ok((
        ResultDoc {
            id: ResultId::from_digest(&sha),
            route_id: route_id.cloned(),
            simulation,
        },
        sha,
    ))
}
