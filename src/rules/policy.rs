use serde::{Deserialize, Serialize};

use super::{Finding, Outcome};

/// Policy verdict: the pass/fail decision over a set of findings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyVerdict {
    pub pass: bool,
    pub total_findings: usize,
    pub positive: usize,
    pub negative: usize,
    pub not_applicable: usize,
}

/// Policy configuration loaded from `.relprov.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Fail when any release lacks provenance.
    #[serde(default = "default_fail_on_negative")]
    pub fail_on_negative: bool,
    /// Fail when there was nothing to examine.
    #[serde(default)]
    pub fail_on_not_applicable: bool,
}

fn default_fail_on_negative() -> bool {
    true
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            fail_on_negative: true,
            fail_on_not_applicable: false,
        }
    }
}

impl Policy {
    /// Evaluate findings against this policy and produce a verdict.
    pub fn evaluate(&self, findings: &[Finding]) -> PolicyVerdict {
        let count = |outcome: Outcome| findings.iter().filter(|f| f.outcome == outcome).count();
        let positive = count(Outcome::Positive);
        let negative = count(Outcome::Negative);
        let not_applicable = count(Outcome::NotApplicable);

        let failed = (self.fail_on_negative && negative > 0)
            || (self.fail_on_not_applicable && not_applicable > 0);

        PolicyVerdict {
            pass: !failed,
            total_findings: findings.len(),
            positive,
            negative,
            not_applicable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_finding(outcome: Outcome) -> Finding {
        Finding {
            probe: "releasesHaveProvenance".into(),
            message: "test".into(),
            location: None,
            outcome,
            values: vec![],
            remediation: None,
        }
    }

    #[test]
    fn default_policy_fails_on_negative() {
        let findings = vec![
            make_finding(Outcome::Positive),
            make_finding(Outcome::Negative),
        ];
        let verdict = Policy::default().evaluate(&findings);
        assert!(!verdict.pass);
        assert_eq!(verdict.positive, 1);
        assert_eq!(verdict.negative, 1);
        assert_eq!(verdict.total_findings, 2);
    }

    #[test]
    fn default_policy_passes_not_applicable() {
        let findings = vec![make_finding(Outcome::NotApplicable)];
        let verdict = Policy::default().evaluate(&findings);
        assert!(verdict.pass);
        assert_eq!(verdict.not_applicable, 1);
    }

    #[test]
    fn strict_policy_fails_not_applicable() {
        let policy = Policy {
            fail_on_not_applicable: true,
            ..Default::default()
        };
        let verdict = policy.evaluate(&[make_finding(Outcome::NotApplicable)]);
        assert!(!verdict.pass);
    }

    #[test]
    fn lenient_policy_passes_negative() {
        let policy = Policy {
            fail_on_negative: false,
            ..Default::default()
        };
        let verdict = policy.evaluate(&[make_finding(Outcome::Negative)]);
        assert!(verdict.pass);
    }
}
