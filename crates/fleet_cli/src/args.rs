// crates/fleet_cli/src/args.rs
//
// Offline CLI argument surface.
// - No networked paths (reject any scheme:// like http/https/file)
// - Exactly one input mode: --manifest XOR --scenario XOR (--shift + --route + --demand)
// - Output: optional --out dir for canonical artifacts, --render for stdout
// - --validate-only prints the advisory report without simulating

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use thiserror::Error;

use fleet_core::RouteId;
use fleet_io::loader::InputSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RenderFormat {
    Text,
    Json,
    Html,
}

/// Parsed CLI arguments (raw).
#[derive(Debug, Parser, Clone)]
#[command(
    name = "fleet",
    version,
    disable_help_subcommand = true,
    about = "Offline, deterministic passenger-to-vehicle allocation for one route"
)]
pub struct Args {
    /// Run manifest JSON naming the inputs (and optional pins).
    #[arg(long, conflicts_with_all = ["scenario", "shift", "route", "demand"])]
    pub manifest: Option<PathBuf>,

    /// Scenario JSON: { route?, rules, demand }.
    #[arg(long, conflicts_with_all = ["shift", "route", "demand"])]
    pub scenario: Option<PathBuf>,

    /// Shift profile JSON holding the routes and their rules.
    #[arg(long)]
    pub shift: Option<PathBuf>,
    /// Route id to pick from the shift.
    #[arg(long)]
    pub route: Option<RouteId>,
    /// Demand snapshot JSON (array of OD pairs).
    #[arg(long)]
    pub demand: Option<PathBuf>,

    /// Directory for result.json and run_record.json (omit to skip artifacts).
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Report printed to stdout.
    #[arg(long, value_enum, default_value_t = RenderFormat::Text)]
    pub render: RenderFormat,
    /// RFC3339 UTC timestamp recorded in run_record.json (default: fixed placeholder).
    #[arg(long)]
    pub timestamp: Option<String>,

    /// Load and check inputs only; exit 2 if an error-level issue is found.
    #[arg(long)]
    pub validate_only: bool,

    /// Silence all log output.
    #[arg(long, conflicts_with = "verbose")]
    pub quiet: bool,
    /// Info-level log output.
    #[arg(long)]
    pub verbose: bool,
}

/// Where the inputs come from, after mode checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Manifest(PathBuf),
    Direct(InputSource),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("missing required flag: {0}")]
    Missing(&'static str),
    #[error("one input mode is required: --manifest, --scenario, or --shift/--route/--demand")]
    NoInput,
    #[error("path must be local file (no scheme): {0}")]
    NonLocalPath(String),
    #[error("file not found: {0}")]
    NotFound(String),
}

/// Reject any explicit URI scheme (e.g., http://, https://, file://).
#[inline]
fn has_scheme(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    lower.contains("://") || lower.starts_with("http:") || lower.starts_with("https:") || lower.starts_with("file:")
}

#[inline]
fn ensure_local_path(p: &Path) -> Result<(), CliError> {
    let s = p.to_string_lossy();
    if has_scheme(&s) {
        return Err(CliError::NonLocalPath(s.into_owned()));
    }
    Ok(())
}

fn ensure_local_file(p: &Path, label: &'static str) -> Result<(), CliError> {
    ensure_local_path(p)?;
    match fs::metadata(p) {
        Ok(meta) if meta.is_file() => Ok(()),
        _ => Err(CliError::NotFound(format!("{label} {}", p.display()))),
    }
}

/// All path-like flags (including `--out`) for scheme checks.
fn iter_all_paths(args: &Args) -> impl Iterator<Item = &Path> {
    [
        args.manifest.as_deref(),
        args.scenario.as_deref(),
        args.shift.as_deref(),
        args.demand.as_deref(),
        args.out.as_deref(),
    ]
    .into_iter()
    .flatten()
}

/// Mode checks after clap has parsed; clap already rejects conflicting modes.
pub fn input_mode(args: &Args) -> Result<InputMode, CliError> {
    for p in iter_all_paths(args) {
        ensure_local_path(p)?;
    }

    if let Some(m) = &args.manifest {
        ensure_local_file(m, "--manifest")?;
        return Ok(InputMode::Manifest(m.clone()));
    }
    if let Some(s) = &args.scenario {
        ensure_local_file(s, "--scenario")?;
        return Ok(InputMode::Direct(InputSource::Scenario(s.clone())));
    }
    if args.shift.is_none() && args.route.is_none() && args.demand.is_none() {
        return Err(CliError::NoInput);
    }
    let shift = args.shift.as_ref().ok_or(CliError::Missing("--shift"))?;
    let route = args.route.as_ref().ok_or(CliError::Missing("--route"))?;
    let demand = args.demand.as_ref().ok_or(CliError::Missing("--demand"))?;
    ensure_local_file(shift, "--shift")?;
    ensure_local_file(demand, "--demand")?;
    Ok(InputMode::Direct(InputSource::Shift {
        shift: shift.clone(),
        route: route.clone(),
        demand: demand.clone(),
    }))
}

pub fn parse_and_validate() -> Result<(Args, InputMode), CliError> {
    let args = Args::parse();
    let mode = input_mode(&args)?;
    Ok((args, mode))
}
