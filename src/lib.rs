//! relprov — checks whether a project's releases ship build provenance.
//!
//! Offline and read-only: the release history is fetched elsewhere and
//! handed over as a snapshot. Each recent release with assets is classified
//! as having or lacking a provenance attestation (`*.intoto.jsonl`).
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use relprov::{scan, ScanOptions};
//!
//! let options = ScanOptions::default();
//! let report = scan(Path::new("releases.json"), &options).unwrap();
//! println!("Pass: {}, Findings: {}", report.verdict.pass, report.findings.len());
//! ```

pub mod config;
pub mod error;
pub mod output;
pub mod rules;
pub mod snapshot;

use std::path::{Path, PathBuf};

use config::Config;
use error::Result;
use output::OutputFormat;
use rules::policy::PolicyVerdict;
use rules::{Finding, ProbeDefinition, ProbeEngine};
use snapshot::ReleaseSnapshot;

/// Options for a scan invocation.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Path to config file (defaults to `.relprov.toml` in the working directory).
    pub config_path: Option<PathBuf>,
    /// Output format.
    pub format: OutputFormat,
    /// CLI override for the look-back bound.
    pub lookback_override: Option<usize>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            config_path: None,
            format: OutputFormat::Console,
            lookback_override: None,
        }
    }
}

/// Complete scan report.
#[derive(Debug)]
pub struct ScanReport {
    pub target_name: String,
    /// Definitions of the probes that ran, in run order.
    pub probes: Vec<ProbeDefinition>,
    pub findings: Vec<Finding>,
    pub verdict: PolicyVerdict,
}

/// Load a snapshot file, run all probes, evaluate policy.
pub fn scan(snapshot_path: &Path, options: &ScanOptions) -> Result<ScanReport> {
    let config_path = options
        .config_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(".relprov.toml"));
    let mut config = Config::load(&config_path)?;

    if let Some(lookback) = options.lookback_override {
        config.probe.lookback = lookback;
    }

    let snapshot = ReleaseSnapshot::load(snapshot_path)?;
    let target_name = snapshot.repository.clone().unwrap_or_else(|| {
        snapshot_path
            .file_stem()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unknown".into())
    });

    scan_snapshot(&snapshot, &config, target_name)
}

/// Run all probes over an in-memory snapshot and evaluate policy.
pub fn scan_snapshot(
    snapshot: &ReleaseSnapshot,
    config: &Config,
    target_name: impl Into<String>,
) -> Result<ScanReport> {
    let engine = ProbeEngine::with_settings(&config.probe);

    let mut probes = Vec::new();
    let mut findings = Vec::new();
    for output in engine.run(snapshot)? {
        probes.push(output.definition);
        findings.extend(output.findings);
    }
    let verdict = config.policy.evaluate(&findings);

    Ok(ScanReport {
        target_name: target_name.into(),
        probes,
        findings,
        verdict,
    })
}

/// Render a scan report in the specified format.
pub fn render_report(report: &ScanReport, format: OutputFormat) -> Result<String> {
    output::render(
        &report.findings,
        &report.verdict,
        &report.probes,
        format,
        &report.target_name,
    )
}
