use crate::rules::policy::PolicyVerdict;
use crate::rules::{Finding, Outcome};

/// Render findings as plain console output, in probe order.
pub fn render(findings: &[Finding], verdict: &PolicyVerdict) -> String {
    let mut output = String::new();

    if findings.is_empty() {
        output.push_str("\n  No findings.\n\n");
        return output;
    }

    output.push_str(&format!("\n  {} finding(s):\n\n", findings.len()));

    for finding in findings {
        let outcome_tag = match finding.outcome {
            Outcome::Positive => "[PASS]",
            Outcome::Negative => "[FAIL]",
            Outcome::NotApplicable => "[N/A] ",
        };

        let location = finding
            .location
            .as_ref()
            .map(|l| l.path.clone())
            .unwrap_or_else(|| "-".into());

        output.push_str(&format!(
            "  {} {} {}\n",
            outcome_tag, finding.probe, finding.message
        ));
        output.push_str(&format!("         at {}\n", location));
        if let Some(remediation) = &finding.remediation {
            output.push_str(&format!("         fix: {}\n", remediation.replace('\n', " ")));
        }
        output.push('\n');
    }

    let status = if verdict.pass { "PASS" } else { "FAIL" };
    output.push_str(&format!(
        "  Result: {} (positive: {}, negative: {}, not applicable: {})\n\n",
        status, verdict.positive, verdict.negative, verdict.not_applicable,
    ));

    output
}
