pub mod builtin;
pub mod catalog;
pub mod finding;
pub mod policy;

use crate::error::Result;
use crate::snapshot::ReleaseSnapshot;

pub use builtin::releases_have_provenance::{LookBackMode, ProvenanceSettings};
pub use catalog::{BuiltinCatalog, ProbeDefinition, RuleCatalog, StaticCatalog};
pub use finding::{Finding, FindingValue, Location, LocationKind, Outcome, ValueKind};

/// A probe inspects a release snapshot and produces findings.
pub trait Probe: Send + Sync {
    /// Fixed identifier, also the catalog key for the probe's rule text.
    fn id(&self) -> &'static str;

    /// Rule text for this probe (id, description, remediation).
    fn metadata(&self, catalog: &dyn RuleCatalog) -> Result<ProbeDefinition> {
        catalog.definition(self.id())
    }

    /// Run the probe, returning its findings and its identifier.
    /// Either every finding is returned or none is.
    fn run(
        &self,
        snapshot: &ReleaseSnapshot,
        catalog: &dyn RuleCatalog,
    ) -> Result<(Vec<Finding>, &'static str)>;
}

/// Findings of one probe, together with the rule text that describes them.
#[derive(Debug, Clone)]
pub struct ProbeOutput {
    pub probe: &'static str,
    pub definition: ProbeDefinition,
    pub findings: Vec<Finding>,
}

/// Runs every registered probe against a snapshot.
pub struct ProbeEngine {
    probes: Vec<Box<dyn Probe>>,
    catalog: Box<dyn RuleCatalog>,
}

impl ProbeEngine {
    /// Create an engine with all built-in probes and the built-in catalog.
    pub fn new() -> Self {
        Self::with_settings(&ProvenanceSettings::default())
    }

    pub fn with_settings(settings: &ProvenanceSettings) -> Self {
        Self {
            probes: builtin::all_probes(settings),
            catalog: Box::new(BuiltinCatalog::new()),
        }
    }

    /// Replace the rule-text catalog.
    pub fn with_catalog(mut self, catalog: impl RuleCatalog + 'static) -> Self {
        self.catalog = Box::new(catalog);
        self
    }

    pub fn run(&self, snapshot: &ReleaseSnapshot) -> Result<Vec<ProbeOutput>> {
        let catalog = self.catalog.as_ref();
        let mut outputs = Vec::with_capacity(self.probes.len());
        for probe in &self.probes {
            let (findings, id) = probe.run(snapshot, catalog)?;
            tracing::debug!(probe = id, findings = findings.len(), "probe finished");
            outputs.push(ProbeOutput {
                probe: id,
                definition: probe.metadata(catalog)?,
                findings,
            });
        }
        Ok(outputs)
    }

    /// Definitions of all registered probes.
    pub fn list_probes(&self) -> Result<Vec<ProbeDefinition>> {
        self.probes
            .iter()
            .map(|p| p.metadata(self.catalog.as_ref()))
            .collect()
    }
}

impl Default for ProbeEngine {
    fn default() -> Self {
        Self::new()
    }
}
