pub mod releases_have_provenance;

use super::{Probe, ProvenanceSettings};

/// Returns all built-in probes.
pub fn all_probes(settings: &ProvenanceSettings) -> Vec<Box<dyn Probe>> {
    vec![Box::new(
        releases_have_provenance::ReleasesHaveProvenance::new(settings.clone()),
    )]
}
