pub mod console;
pub mod json;
pub mod sarif;

use serde::{Deserialize, Serialize};

use std::path::Path;

use crate::error::{ProbeError, Result};
use crate::rules::policy::PolicyVerdict;
use crate::rules::{Finding, ProbeDefinition};

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Sarif,
}

impl OutputFormat {
    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "console" | "text" => Some(Self::Console),
            "json" => Some(Self::Json),
            "sarif" => Some(Self::Sarif),
            _ => None,
        }
    }
}

/// Render findings into the specified format.
pub fn render(
    findings: &[Finding],
    verdict: &PolicyVerdict,
    probes: &[ProbeDefinition],
    format: OutputFormat,
    target_name: &str,
) -> Result<String> {
    match format {
        OutputFormat::Console => Ok(console::render(findings, verdict)),
        OutputFormat::Json => json::render(findings, verdict, probes, target_name),
        OutputFormat::Sarif => sarif::render(findings, probes, target_name),
    }
}

/// Write a rendered report to `path`.
pub fn write_report(path: &Path, rendered: &str) -> Result<()> {
    std::fs::write(path, rendered)
        .map_err(|e| ProbeError::Output(format!("cannot write {}: {}", path.display(), e)))
}
