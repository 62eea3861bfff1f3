use crate::error::Result;
use crate::rules::{Finding, Outcome, ProbeDefinition};

use serde_json::{json, Value};
use uuid::Uuid;

/// Render findings as SARIF 2.1.0.
///
/// Every finding becomes a result, positive ones included, so consumers see
/// which releases were examined. Evidence URLs go into `artifactLocation.uri`.
/// Rule metadata comes from the probe definitions, not from the findings.
pub fn render(findings: &[Finding], probes: &[ProbeDefinition], target_name: &str) -> Result<String> {
    let rules: Vec<Value> = probes
        .iter()
        .map(|probe| {
            let mut rule = json!({
                "id": probe.id,
                "name": probe.id,
                "shortDescription": { "text": probe.short.trim() },
                "defaultConfiguration": {
                    "level": outcome_to_sarif_level(Outcome::Negative),
                },
            });
            if !probe.motivation.trim().is_empty() {
                rule["fullDescription"] = json!({ "text": probe.motivation.trim() });
            }
            if !probe.remediation.trim().is_empty() {
                rule["help"] = json!({ "text": probe.remediation.trim() });
            }
            rule
        })
        .collect();

    let results: Vec<Value> = findings
        .iter()
        .map(|f| {
            let mut result = json!({
                "ruleId": f.probe,
                "level": outcome_to_sarif_level(f.outcome),
                "kind": outcome_to_sarif_kind(f.outcome),
                "message": { "text": f.message },
            });

            if let Some(loc) = &f.location {
                result["locations"] = json!([{
                    "physicalLocation": {
                        "artifactLocation": {
                            "uri": loc.path,
                        },
                    },
                }]);
            }

            if !f.values.is_empty() {
                result["properties"] = json!({ "values": f.values });
            }

            if let Some(remediation) = &f.remediation {
                result["fixes"] = json!([{
                    "description": { "text": remediation },
                }]);
            }

            result
        })
        .collect();

    let sarif = json!({
        "$schema": "https://docs.oasis-open.org/sarif/sarif/v2.1.0/errata01/os/schemas/sarif-schema-2.1.0.json",
        "version": "2.1.0",
        "runs": [{
            "tool": {
                "driver": {
                    "name": "relprov",
                    "version": env!("CARGO_PKG_VERSION"),
                    "semanticVersion": env!("CARGO_PKG_VERSION"),
                    "rules": rules,
                },
            },
            "results": results,
            "automationDetails": {
                "id": format!("relprov/{}/", target_name),
                "guid": Uuid::new_v4().to_string(),
            },
        }],
    });

    let output = serde_json::to_string_pretty(&sarif)?;
    Ok(output)
}

fn outcome_to_sarif_level(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Negative => "warning",
        Outcome::Positive | Outcome::NotApplicable => "none",
    }
}

fn outcome_to_sarif_kind(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Positive => "pass",
        Outcome::Negative => "fail",
        Outcome::NotApplicable => "notApplicable",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{BuiltinCatalog, Location, RuleCatalog, ValueKind};

    fn finding(outcome: Outcome, location: Option<Location>) -> Finding {
        Finding {
            probe: "releasesHaveProvenance".into(),
            message: "m".into(),
            location,
            outcome,
            values: vec![],
            remediation: None,
        }
    }

    fn probes() -> Vec<ProbeDefinition> {
        vec![BuiltinCatalog::new().definition("releasesHaveProvenance").unwrap()]
    }

    #[test]
    fn one_rule_per_probe() {
        let findings = vec![
            finding(Outcome::Positive, None),
            finding(Outcome::Negative, None),
        ];
        let value: Value = serde_json::from_str(&render(&findings, &probes(), "t").unwrap()).unwrap();
        assert_eq!(value["runs"][0]["tool"]["driver"]["rules"].as_array().unwrap().len(), 1);
        assert_eq!(value["runs"][0]["results"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn rule_text_comes_from_definition_when_first_finding_is_positive() {
        let findings = vec![
            finding(Outcome::Positive, None),
            finding(Outcome::Negative, None),
        ];
        let probes = probes();
        let definition = &probes[0];
        let value: Value = serde_json::from_str(&render(&findings, &probes, "t").unwrap()).unwrap();
        let rule = &value["runs"][0]["tool"]["driver"]["rules"][0];

        assert_eq!(rule["id"], "releasesHaveProvenance");
        assert_eq!(rule["shortDescription"]["text"], definition.short.trim());
        assert_eq!(rule["help"]["text"], definition.remediation.trim());
        assert!(rule["fullDescription"]["text"].is_string());
    }

    #[test]
    fn maps_outcomes_and_locations() {
        let findings = vec![
            finding(Outcome::Negative, Some(Location::url("https://example.com/v1")))
                .with_value("v1", ValueKind::ReleaseTag),
            finding(Outcome::NotApplicable, None),
        ];
        let value: Value = serde_json::from_str(&render(&findings, &probes(), "t").unwrap()).unwrap();
        let results = &value["runs"][0]["results"];

        assert_eq!(results[0]["level"], "warning");
        assert_eq!(results[0]["kind"], "fail");
        assert_eq!(
            results[0]["locations"][0]["physicalLocation"]["artifactLocation"]["uri"],
            "https://example.com/v1"
        );
        assert_eq!(results[0]["properties"]["values"][0]["value"], "v1");
        assert_eq!(results[1]["kind"], "notApplicable");
        assert_eq!(results[1]["level"], "none");
        assert!(results[1].get("locations").is_none());
    }
}
