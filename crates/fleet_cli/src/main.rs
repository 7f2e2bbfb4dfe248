// crates/fleet_cli/src/main.rs
//
// Exit codes, error mapping, logging setup, validate-only short-circuit and
// the full run path (load → pipeline → artifacts → report).

mod args;

mod exitcodes {
    pub const OK: u8 = 0;
    pub const VALIDATION: u8 = 2;
    pub const IO: u8 = 4;
    pub const BUILD: u8 = 5;
}

use std::io::Write as _;
use std::path::Path;
use std::process::ExitCode;

use log::LevelFilter;
use thiserror::Error;

use args::{parse_and_validate as parse_cli, Args, InputMode, RenderFormat};
use fleet_io::canonical_json;
use fleet_io::loader;
use fleet_pipeline::{
    engine_identifiers, load_manifest_inputs, run_with_ctx, validate, PipelineCtx, PipelineError, PipelineOutputs,
    RunPins, ValidationReport,
};
use fleet_report::{build_model, IntegrityBlock};

/// Central error type for CLI → exit-code mapping.
#[derive(Debug, Error)]
enum MainError {
    #[error("validation: {0}")]
    Validation(String),
    #[error("io: {0}")]
    Io(String),
    #[error("build: {0}")]
    Build(String),
}

impl From<PipelineError> for MainError {
    fn from(e: PipelineError) -> Self {
        match e {
            PipelineError::Validate(m) => MainError::Validation(m),
            PipelineError::Io(m) => MainError::Io(m),
            PipelineError::Build(m) => MainError::Build(m),
        }
    }
}

fn map_error(e: &MainError) -> u8 {
    match e {
        MainError::Validation(_) => exitcodes::VALIDATION,
        MainError::Io(_) => exitcodes::IO,
        MainError::Build(_) => exitcodes::BUILD,
    }
}

fn init_logging(args: &Args) {
    let level = if args.quiet {
        LevelFilter::Off
    } else if args.verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).format_timestamp(None);
    // RUST_LOG still wins unless --quiet was given.
    if !args.quiet {
        builder.parse_default_env();
    }
    let _ = builder.try_init();
}

fn main() -> ExitCode {
    let (args, mode) = match parse_cli() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("fleet: error: {e}");
            return ExitCode::from(exitcodes::VALIDATION);
        }
    };
    init_logging(&args);

    let outcome = if args.validate_only {
        validate_only(&args, &mode)
    } else {
        run_once(&args, &mode)
    };

    match outcome {
        Ok(rc) => ExitCode::from(rc),
        Err(e) => {
            eprintln!("fleet: error: {e}");
            ExitCode::from(map_error(&e))
        }
    }
}

fn load_inputs(mode: &InputMode) -> Result<(loader::Scenario, RunPins), MainError> {
    match mode {
        InputMode::Manifest(path) => Ok(load_manifest_inputs(path)?),
        InputMode::Direct(source) => {
            let scenario = loader::load_source(source).map_err(PipelineError::from)?;
            Ok((scenario, RunPins::default()))
        }
    }
}

/// Advisory report only; exit 2 iff an error-severity issue exists.
fn validate_only(args: &Args, mode: &InputMode) -> Result<u8, MainError> {
    let (scenario, _pins) = load_inputs(mode)?;
    let report = validate::validate(&scenario);

    let text = match args.render {
        RenderFormat::Json => serde_json::to_string_pretty(&report)
            .map_err(|e| MainError::Build(format!("validation report: {e}")))?,
        RenderFormat::Text | RenderFormat::Html => validation_text(&report),
    };
    emit(&text)?;

    Ok(if report.pass { exitcodes::OK } else { exitcodes::VALIDATION })
}

fn validation_text(r: &ValidationReport) -> String {
    let mut out = format!(
        "validation: {} ({} error(s), {} warning(s))\n",
        if r.pass { "pass" } else { "fail" },
        r.errors(),
        r.warnings()
    );
    for i in &r.issues {
        let sev = match i.severity {
            fleet_pipeline::Severity::Error => "error",
            fleet_pipeline::Severity::Warning => "warning",
        };
        out.push_str(&format!("  {sev} {} [{}]: {}\n", i.code, i.where_, i.message));
    }
    out
}

fn run_once(args: &Args, mode: &InputMode) -> Result<u8, MainError> {
    let (scenario, pins) = load_inputs(mode)?;
    let route_label = scenario.route.as_ref().map(|r| format!("{} ({})", r.name, r.id));

    let ctx = PipelineCtx {
        scenario,
        engine_meta: engine_identifiers(),
        timestamp_utc: args.timestamp.clone(),
        pins,
    };
    let outs = run_with_ctx(ctx)?;

    if let Some(out_dir) = &args.out {
        write_artifacts(out_dir, &outs)?;
        log::info!("artifacts written to {}", out_dir.display());
    }

    let mut model = build_model(outs.simulation()).with_integrity(IntegrityBlock {
        result_id: outs.result.id.to_string(),
        run_id: outs.run_record.id.clone(),
        inputs_sha256: outs.run_record.inputs.inputs_sha256.to_string(),
    });
    if let Some(label) = route_label {
        model = model.with_route(label);
    }

    let rendered = match args.render {
        RenderFormat::Text => fleet_report::render_text(&model),
        RenderFormat::Json => render_json(&model)?,
        RenderFormat::Html => render_html(&model)?,
    };
    emit(&rendered)?;
    Ok(exitcodes::OK)
}

fn write_artifacts(out_dir: &Path, outs: &PipelineOutputs) -> Result<(), MainError> {
    canonical_json::write_canonical_file(&out_dir.join("result.json"), &outs.result)
        .map_err(|e| MainError::Io(format!("write result.json: {e}")))?;
    canonical_json::write_canonical_file(&out_dir.join("run_record.json"), &outs.run_record)
        .map_err(|e| MainError::Io(format!("write run_record.json: {e}")))?;
    Ok(())
}

#[cfg(feature = "report-json")]
fn render_json(model: &fleet_report::ReportModel) -> Result<String, MainError> {
    fleet_report::render_json(model).map_err(|e| MainError::Build(format!("report: {e}")))
}

#[cfg(not(feature = "report-json"))]
fn render_json(_model: &fleet_report::ReportModel) -> Result<String, MainError> {
    Err(MainError::Validation("json renderer not enabled (build with feature `report-json`)".into()))
}

#[cfg(feature = "report-html")]
fn render_html(model: &fleet_report::ReportModel) -> Result<String, MainError> {
    Ok(fleet_report::render_html(model))
}

#[cfg(not(feature = "report-html"))]
fn render_html(_model: &fleet_report::ReportModel) -> Result<String, MainError> {
    Err(MainError::Validation("html renderer not enabled (build with feature `report-html`)".into()))
}

fn emit(text: &str) -> Result<(), MainError> {
    let io = |e: std::io::Error| MainError::Io(format!("stdout: {e}"));
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes()).map_err(io)?;
    if !text.ends_with('\n') {
        stdout.write_all(b"\n").map_err(io)?;
    }
    stdout.flush().map_err(io)
}
