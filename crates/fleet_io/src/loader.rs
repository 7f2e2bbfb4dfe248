//! Loader: read local JSON inputs (scenario, shift profile, demand snapshot)
//! and return typed values for the pipeline. No network I/O.
//!
//! Two ways in:
//! - one scenario file `{ route?, rules, demand }`;
//! - a shift file plus a route id plus a demand file, combined by
//!   `scenario_from_shift`.

#![forbid(unsafe_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use fleet_core::{OdPair, RouteId, RouteInfo, ShiftProfile, VehicleRule};

use crate::{looks_like_url_strict, IoError, IoResult};

/// Everything one simulation needs: the rules of one route and a demand snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<RouteInfo>,
    #[serde(default)]
    pub rules: Vec<VehicleRule>,
    #[serde(default)]
    pub demand: Vec<OdPair>,
}

/// Snapshot that input digests are computed over (presentation-free).
#[derive(Serialize)]
pub struct InputSnapshot<'a> {
    pub rules: &'a [VehicleRule],
    pub demand: &'a [OdPair],
}

impl Scenario {
    pub fn snapshot(&self) -> InputSnapshot<'_> {
        InputSnapshot { rules: &self.rules, demand: &self.demand }
    }

    pub fn route_id(&self) -> Option<&RouteId> {
        self.route.as_ref().map(|r| &r.id)
    }
}

/// Read and deserialize one local JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> IoResult<T> {
    let shown = path.to_string_lossy();
    if looks_like_url_strict(&shown) {
        return Err(IoError::Invalid(format!("URL paths are not allowed: {shown}")));
    }
    let raw = fs::read_to_string(path).map_err(|e| IoError::Path(format!("{shown}: {e}")))?;
    serde_json::from_str(&raw).map_err(|e| IoError::Json {
        pointer: format!("{shown}:{}:{}", e.line(), e.column()),
        msg: e.to_string(),
    })
}

pub fn load_scenario(path: &Path) -> IoResult<Scenario> {
    let scenario: Scenario = read_json(path)?;
    log::debug!(
        "loaded scenario {}: {} rule(s), {} OD pair(s)",
        path.display(),
        scenario.rules.len(),
        scenario.demand.len()
    );
    Ok(scenario)
}

pub fn load_shift(path: &Path) -> IoResult<ShiftProfile> {
    let shift: ShiftProfile = read_json(path)?;
    log::debug!("loaded shift {} ({} route(s))", shift.id, shift.routes.len());
    Ok(shift)
}

/// A demand snapshot is a bare array of OD pairs.
pub fn load_demand(path: &Path) -> IoResult<Vec<OdPair>> {
    let demand: Vec<OdPair> = read_json(path)?;
    log::debug!("loaded demand {}: {} OD pair(s)", path.display(), demand.len());
    Ok(demand)
}

/// Where a scenario comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Scenario(PathBuf),
    Shift { shift: PathBuf, route: RouteId, demand: PathBuf },
}

/// Load whichever input form `source` names.
pub fn load_source(source: &InputSource) -> IoResult<Scenario> {
    match source {
        InputSource::Scenario(path) => load_scenario(path),
        InputSource::Shift { shift, route, demand } => {
            let shift = load_shift(shift)?;
            scenario_from_shift(&shift, route, load_demand(demand)?)
        }
    }
}

/// Pick one route of a shift and pair its rules with a demand snapshot.
pub fn scenario_from_shift(shift: &ShiftProfile, route: &RouteId, demand: Vec<OdPair>) -> IoResult<Scenario> {
    let found = shift
        .route(route)
        .ok_or_else(|| IoError::Invalid(format!("route {route} not found in shift {}", shift.id)))?;
    Ok(Scenario {
        route: Some(found.info()),
        rules: found.rules.clone(),
        demand,
    })
}
