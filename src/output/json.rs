use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::Result;
use crate::rules::policy::PolicyVerdict;
use crate::rules::{Finding, ProbeDefinition};

#[derive(Serialize)]
struct JsonReport<'a> {
    run_id: Uuid,
    generated_at: DateTime<Utc>,
    repository: &'a str,
    /// Identifiers of the probes that produced `findings`.
    probes: Vec<&'a str>,
    findings: &'a [Finding],
    verdict: &'a PolicyVerdict,
}

/// Render findings as a JSON report.
pub fn render(
    findings: &[Finding],
    verdict: &PolicyVerdict,
    probes: &[ProbeDefinition],
    repository: &str,
) -> Result<String> {
    let report = JsonReport {
        run_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        repository,
        probes: probes.iter().map(|p| p.id.as_str()).collect(),
        findings,
        verdict,
    };
    let json = serde_json::to_string_pretty(&report)?;
    Ok(json)
}
