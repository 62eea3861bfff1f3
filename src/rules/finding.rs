use serde::{Deserialize, Serialize};

use super::catalog::{ProbeDefinition, RuleCatalog};
use crate::error::Result;

/// A single verdict produced by a probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Identifier of the probe that produced this finding.
    pub probe: String,
    /// Human-readable description of the finding.
    pub message: String,
    /// Where the evidence lives, if anywhere.
    pub location: Option<Location>,
    pub outcome: Outcome,
    /// Values the message refers to, tagged with what they are.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<FindingValue>,
    /// Suggested remediation (negative findings only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Positive,
    Negative,
    NotApplicable,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positive => write!(f, "positive"),
            Self::Negative => write!(f, "negative"),
            Self::NotApplicable => write!(f, "not applicable"),
        }
    }
}

/// Evidence pointer attached to a finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub kind: LocationKind,
    pub path: String,
}

impl Location {
    pub fn url(path: impl Into<String>) -> Self {
        Self {
            kind: LocationKind::Url,
            path: path.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    Url,
}

/// A string the finding refers to and what kind of string it is.
///
/// Kept as an ordered list rather than a map: a tag and an asset name can
/// be the same string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingValue {
    pub value: String,
    pub kind: ValueKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    ReleaseTag,
    ReleaseAssetName,
}

impl Finding {
    /// Build a finding for `probe`, pulling rule text from `catalog`.
    ///
    /// Fails with a construction error if the catalog cannot describe the probe.
    pub fn from_catalog(
        catalog: &dyn RuleCatalog,
        probe: &str,
        message: impl Into<String>,
        location: Option<Location>,
        outcome: Outcome,
    ) -> Result<Self> {
        let definition = catalog.definition(probe)?;
        Ok(Self::from_definition(&definition, message, location, outcome))
    }

    pub fn from_definition(
        definition: &ProbeDefinition,
        message: impl Into<String>,
        location: Option<Location>,
        outcome: Outcome,
    ) -> Self {
        let remediation = match outcome {
            Outcome::Negative => Some(definition.remediation.trim().to_string()),
            Outcome::Positive | Outcome::NotApplicable => None,
        };
        Self {
            probe: definition.id.clone(),
            message: message.into(),
            location,
            outcome,
            values: Vec::new(),
            remediation,
        }
    }

    /// Attach a tagged value, builder style.
    pub fn with_value(mut self, value: impl Into<String>, kind: ValueKind) -> Self {
        self.values.push(FindingValue {
            value: value.into(),
            kind,
        });
        self
    }
}
