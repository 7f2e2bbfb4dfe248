//! fleet_pipeline: deterministic run surface (load → pin checks → validate → simulate → build).
//! All JSON/hashing goes through `fleet_io`; allocation is `fleet_algo::simulate`.
//!
//! Entry points:
//! - `run_with_ctx` for an already-loaded scenario;
//! - `run_from_source`, `run_from_scenario_path`, `run_from_shift_paths`,
//!   `run_from_manifest_path` for file inputs;
//! - `validate_source` for the advisory report alone.

#![forbid(unsafe_code)]

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use fleet_core::{RouteId, Sha256, SimulationResult};
use fleet_io::loader::{self, InputSource, Scenario};
use fleet_io::{hasher, manifest, IoError};

pub mod build_result;
pub mod build_run_record;
pub mod validate;

pub use build_result::ResultDoc;
pub use build_run_record::{RunRecordDoc, PLACEHOLDER_TIMESTAMP};
pub use validate::{Severity, ValidationIssue, ValidationReport};

use build_run_record::{RunFacts, RunInputs, RunOutputs, ValidationSummary};

/// Engine identifiers echoed into run records and checked against manifest pins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineMeta {
    pub vendor: String,
    pub name: String,
    pub version: String,
    pub build: String,
}

/// Engine identifiers of this build.
pub fn engine_identifiers() -> EngineMeta {
    EngineMeta {
        vendor: "fleet".to_string(),
        name: "fleet_engine".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        build: "dev".to_string(),
    }
}

/// Optional pins a run must satisfy before it simulates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunPins {
    pub inputs_sha256: Option<Sha256>,
    pub engine_version: Option<String>,
}

/// A loaded scenario plus what the run record needs.
#[derive(Debug, Clone)]
pub struct PipelineCtx {
    pub scenario: Scenario,
    pub engine_meta: EngineMeta,
    /// RFC3339 UTC; `None` uses `PLACEHOLDER_TIMESTAMP`.
    pub timestamp_utc: Option<String>,
    pub pins: RunPins,
}

impl PipelineCtx {
    pub fn new(scenario: Scenario) -> Self {
        Self {
            scenario,
            engine_meta: engine_identifiers(),
            timestamp_utc: None,
            pins: RunPins::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineOutputs {
    pub result: ResultDoc,
    pub run_record: RunRecordDoc,
    pub validation: ValidationReport,
}

impl PipelineOutputs {
    pub fn simulation(&self) -> &SimulationResult {
        &self.result.simulation
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("io: {0}")]
    Io(String),
    #[error("validate: {0}")]
    Validate(String),
    #[error("build: {0}")]
    Build(String),
}

impl From<IoError> for PipelineError {
    fn from(e: IoError) -> Self {
        match e {
            IoError::Path(m) => PipelineError::Io(format!("path: {m}")),
            IoError::Json { pointer, msg } => PipelineError::Io(format!("json {pointer}: {msg}")),
            IoError::Invalid(m) => PipelineError::Validate(m),
            IoError::Hash(m) => PipelineError::Build(format!("hash: {m}")),
        }
    }
}

/// Run the pipeline on a loaded scenario.
pub fn run_with_ctx(ctx: PipelineCtx) -> Result<PipelineOutputs, PipelineError> {
    let PipelineCtx { scenario, engine_meta, timestamp_utc, pins } = ctx;

    if let Some(expected) = &pins.engine_version {
        if expected != &engine_meta.version {
            return Err(PipelineError::Validate(format!(
                "engine version mismatch: expected {expected}, running {}",
                engine_meta.version
            )));
        }
    }

    let inputs_sha256 = hasher::sha256_canonical(&scenario.snapshot())?;
    if let Some(expected) = &pins.inputs_sha256 {
        if expected != &inputs_sha256 {
            return Err(PipelineError::Validate(format!(
                "inputs digest mismatch: expected {expected}, computed {inputs_sha256}"
            )));
        }
    }

    let validation = validate::validate(&scenario);
    for issue in &validation.issues {
        match issue.severity {
            Severity::Error => log::error!("{}: {}", issue.code, issue.message),
            Severity::Warning => log::warn!("{}: {}", issue.code, issue.message),
        }
    }

    let simulation = fleet_algo::simulate(&scenario.rules, &scenario.demand);
    log::info!(
        "simulated {} vehicle(s): {} allocated, {} unallocated",
        simulation.vehicle_results.len(),
        simulation.total_allocated(),
        simulation.unallocated_passengers
    );

    let route_id = scenario.route_id();
    let vehicles_processed = count(simulation.vehicle_results.len());
    let total_allocated = simulation.total_allocated();
    let unallocated_passengers = simulation.unallocated_passengers;
    let (result, result_sha256) = build_result::build_result(route_id, simulation)?;
    let outputs = RunOutputs {
        result_id: result.id.clone(),
        result_sha256,
        vehicles_processed,
        total_allocated,
        unallocated_passengers,
    };

    let run_record = build_run_record::build_run_record(
        &engine_meta,
        RunFacts {
            timestamp_utc: timestamp_utc.as_deref(),
            route_id,
            inputs: RunInputs {
                inputs_sha256,
                vehicle_rules: count(scenario.rules.len()),
                od_pairs: count(scenario.demand.len()),
            },
            validation: ValidationSummary::from(&validation),
            outputs,
        },
    )?;
    log::debug!("result {} / run {}", result.id, run_record.id);

    Ok(PipelineOutputs { result, run_record, validation })
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Load `source` and run it with default engine meta and no pins.
pub fn run_from_source(source: &InputSource) -> Result<PipelineOutputs, PipelineError> {
    let scenario = loader::load_source(source)?;
    run_with_ctx(PipelineCtx::new(scenario))
}

pub fn run_from_scenario_path<P: AsRef<Path>>(path: P) -> Result<PipelineOutputs, PipelineError> {
    run_from_source(&InputSource::Scenario(path.as_ref().to_path_buf()))
}

pub fn run_from_shift_paths<P: AsRef<Path>, Q: AsRef<Path>>(
    shift: P,
    route: &RouteId,
    demand: Q,
) -> Result<PipelineOutputs, PipelineError> {
    run_from_source(&InputSource::Shift {
        shift: shift.as_ref().to_path_buf(),
        route: route.clone(),
        demand: demand.as_ref().to_path_buf(),
    })
}

/// Parse a run manifest, load what it names, and run with its pins.
pub fn run_from_manifest_path<P: AsRef<Path>>(path: P) -> Result<PipelineOutputs, PipelineError> {
    let (scenario, pins) = load_manifest_inputs(path.as_ref())?;
    let mut ctx = PipelineCtx::new(scenario);
    ctx.pins = pins;
    run_with_ctx(ctx)
}

/// Scenario and pins named by a manifest file.
pub fn load_manifest_inputs(path: &Path) -> Result<(Scenario, RunPins), PipelineError> {
    let man = manifest::load_manifest(path)?;
    let resolved = manifest::resolve_paths(path, &man)?;
    let scenario = loader::load_source(&resolved.source)?;
    let pins = RunPins {
        inputs_sha256: resolved.inputs_sha256,
        engine_version: resolved.expect.engine_version,
    };
    Ok((scenario, pins))
}

/// Advisory report only; nothing is simulated.
pub fn validate_source(source: &InputSource) -> Result<ValidationReport, PipelineError> {
    let scenario = loader::load_source(source)?;
    Ok(validate::validate(&scenario))
}
