//! Human-readable probe descriptions, looked up by probe identifier.
//!
//! Probes never hard-code their rule text. They ask a `RuleCatalog`, so
//! embedders can swap the built-in definitions and tests can run without
//! them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{ProbeError, Result};

/// Probe definition files compiled into the binary, keyed by probe id.
const BUILTIN_DEFINITIONS: &[(&str, &str)] = &[(
    "releasesHaveProvenance",
    include_str!("definitions/releases_have_provenance.toml"),
)];

/// Rule text for one probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeDefinition {
    pub id: String,
    pub short: String,
    #[serde(default)]
    pub motivation: String,
    #[serde(default)]
    pub implementation: String,
    #[serde(default)]
    pub remediation: String,
    #[serde(default)]
    pub outcomes: OutcomeText,
}

/// What each outcome means for this probe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeText {
    #[serde(default)]
    pub positive: String,
    #[serde(default)]
    pub negative: String,
    #[serde(default)]
    pub not_applicable: String,
}

impl ProbeDefinition {
    /// Minimal definition with placeholder text.
    pub fn named(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            short: id.clone(),
            id,
            motivation: String::new(),
            implementation: String::new(),
            remediation: "See probe documentation.".into(),
            outcomes: OutcomeText::default(),
        }
    }
}

/// Source of probe definitions.
pub trait RuleCatalog: Send + Sync {
    /// Definition for `probe`, or a construction error if there is none.
    fn definition(&self, probe: &str) -> Result<ProbeDefinition>;
}

/// Catalog backed by the definition files embedded at compile time.
pub struct BuiltinCatalog {
    entries: HashMap<&'static str, std::result::Result<ProbeDefinition, String>>,
}

impl BuiltinCatalog {
    pub fn new() -> Self {
        let entries = BUILTIN_DEFINITIONS
            .iter()
            .map(|&(id, source)| (id, parse_definition(id, source)))
            .collect();
        Self { entries }
    }
}

impl Default for BuiltinCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleCatalog for BuiltinCatalog {
    fn definition(&self, probe: &str) -> Result<ProbeDefinition> {
        match self.entries.get(probe) {
            Some(Ok(definition)) => Ok(definition.clone()),
            Some(Err(message)) => Err(ProbeError::construction(probe, message.clone())),
            None => Err(ProbeError::construction(probe, "no definition for probe")),
        }
    }
}

fn parse_definition(id: &str, source: &str) -> std::result::Result<ProbeDefinition, String> {
    let definition: ProbeDefinition =
        toml::from_str(source).map_err(|e| format!("malformed definition: {e}"))?;
    if definition.id != id {
        return Err(format!(
            "definition declares id '{}' but is registered as '{}'",
            definition.id, id
        ));
    }
    Ok(definition)
}

/// In-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    definitions: HashMap<String, ProbeDefinition>,
}

impl StaticCatalog {
    pub fn with_probe(definition: ProbeDefinition) -> Self {
        let mut catalog = Self::default();
        catalog.insert(definition);
        catalog
    }

    pub fn insert(&mut self, definition: ProbeDefinition) {
        self.definitions.insert(definition.id.clone(), definition);
    }
}

impl RuleCatalog for StaticCatalog {
    fn definition(&self, probe: &str) -> Result<ProbeDefinition> {
        self.definitions
            .get(probe)
            .cloned()
            .ok_or_else(|| ProbeError::construction(probe, "no definition for probe"))
    }
}
