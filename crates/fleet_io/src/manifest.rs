//! Run manifest: a small JSON file naming the inputs of one run.
//!
//! - Inputs are either one `scenario_path`, or `shift_path` + `route_id` +
//!   `demand_path`; mixing the two forms is rejected.
//! - Relative paths resolve against the manifest's directory.
//! - Offline only: any path with a scheme is rejected.
//! - Optional `inputs_sha256` pins the canonical rules+demand snapshot;
//!   optional `expect.engine_version` pins the engine. Both are checked by the
//!   pipeline once inputs are loaded.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use fleet_core::{RouteId, Sha256};

use crate::loader::{read_json, InputSource};
use crate::{looks_like_url_strict, IoError, IoResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunManifest {
    /// Free-form label; not part of any artifact digest.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub scenario_path: Option<String>,
    #[serde(default)]
    pub shift_path: Option<String>,
    #[serde(default)]
    pub route_id: Option<RouteId>,
    #[serde(default)]
    pub demand_path: Option<String>,
    #[serde(default)]
    pub inputs_sha256: Option<Sha256>,
    #[serde(default)]
    pub expect: Option<Expectations>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Expectations {
    /// Exact engine version string.
    #[serde(default)]
    pub engine_version: Option<String>,
}

/// Manifest with its input paths resolved and checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedManifest {
    pub source: InputSource,
    pub inputs_sha256: Option<Sha256>,
    pub expect: Expectations,
}

fn offline_check(field: &str, value: &str) -> IoResult<()> {
    if value.trim().is_empty() {
        return Err(IoError::Invalid(format!("manifest field must not be empty: {field}")));
    }
    if looks_like_url_strict(value) {
        return Err(IoError::Invalid(format!("path must be offline (no scheme) for {field}: {value}")));
    }
    Ok(())
}

/// Shape and offline policy only; no filesystem access.
pub fn validate_manifest(man: &RunManifest) -> IoResult<()> {
    let shift_form = man.shift_path.is_some() || man.route_id.is_some() || man.demand_path.is_some();
    match (&man.scenario_path, shift_form) {
        (Some(_), true) => Err(IoError::Invalid(
            "manifest names both scenario_path and shift inputs".to_string(),
        )),
        (None, false) => Err(IoError::Invalid("manifest names no inputs".to_string())),
        (Some(p), false) => offline_check("scenario_path", p),
        (None, true) => {
            let shift = man.shift_path.as_deref().ok_or_else(|| missing("shift_path"))?;
            let demand = man.demand_path.as_deref().ok_or_else(|| missing("demand_path"))?;
            if man.route_id.is_none() {
                return Err(missing("route_id"));
            }
            offline_check("shift_path", shift)?;
            offline_check("demand_path", demand)
        }
    }
}

fn missing(field: &str) -> IoError {
    IoError::Invalid(format!("missing required manifest field: {field}"))
}

pub fn load_manifest(path: &Path) -> IoResult<RunManifest> {
    let man: RunManifest = read_json(path)?;
    validate_manifest(&man)?;
    Ok(man)
}

fn join_under(base: &Path, rel: &str) -> PathBuf {
    let p = Path::new(rel);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base.join(p)
    }
}

fn existing_file(field: &str, base: &Path, rel: &str) -> IoResult<PathBuf> {
    let p = join_under(base, rel);
    let meta = std::fs::metadata(&p).map_err(|e| IoError::Path(format!("cannot access {field} {}: {e}", p.display())))?;
    if !meta.is_file() {
        return Err(IoError::Path(format!("{field} is not a file: {}", p.display())));
    }
    Ok(p)
}

/// Resolve the manifest's paths against its own directory and check they exist.
pub fn resolve_paths(manifest_path: &Path, man: &RunManifest) -> IoResult<ResolvedManifest> {
    validate_manifest(man)?;
    let base = manifest_path.parent().unwrap_or_else(|| Path::new("."));

    let source = match (&man.scenario_path, &man.shift_path, &man.route_id, &man.demand_path) {
        (Some(s), ..) => InputSource::Scenario(existing_file("scenario_path", base, s)?),
        (None, Some(shift), Some(route), Some(demand)) => InputSource::Shift {
            shift: existing_file("shift_path", base, shift)?,
            route: route.clone(),
            demand: existing_file("demand_path", base, demand)?,
        },
        _ => return Err(IoError::Invalid("manifest inputs are incomplete".to_string())),
    };

    Ok(ResolvedManifest {
        source,
        inputs_sha256: man.inputs_sha256.clone(),
        expect: man.expect.clone().unwrap_or_default(),
    })
}
