use serde::{Deserialize, Serialize};

use crate::error::{ProbeError, Result};
use crate::rules::{Finding, Location, Outcome, Probe, RuleCatalog, ValueKind};
use crate::snapshot::{Asset, Release, ReleaseSnapshot};

pub const PROBE: &str = "releasesHaveProvenance";

/// Number of examined releases after which scanning stops.
pub const RELEASE_LOOK_BACK: usize = 5;

/// Asset name suffixes that mark a provenance attestation.
pub const PROVENANCE_EXTENSIONS: &[&str] = &[".intoto.jsonl"];

/// When the look-back bound is checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookBackMode {
    /// Check only after a negative finding. A positive release still counts
    /// toward the bound but never ends the scan by itself.
    #[default]
    NegativeOnly,
    /// Stop as soon as the bound is reached, whatever the outcome.
    AnyOutcome,
}

/// Tuning for the provenance probe (`[probe]` in the config file).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvenanceSettings {
    /// Look-back bound on examined releases. 0 disables it.
    pub lookback: usize,
    pub lookback_mode: LookBackMode,
    /// Suffixes, tested in order, case-sensitive.
    pub provenance_extensions: Vec<String>,
}

impl Default for ProvenanceSettings {
    fn default() -> Self {
        Self {
            lookback: RELEASE_LOOK_BACK,
            lookback_mode: LookBackMode::default(),
            provenance_extensions: PROVENANCE_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Checks whether recent releases ship a provenance attestation asset.
///
/// Releases are examined in snapshot order. A release with no assets is
/// skipped and does not count toward the look-back bound. Each examined
/// release yields exactly one finding: positive for the first asset whose
/// name ends in a provenance suffix, negative otherwise. If nothing was
/// examined a single not-applicable finding is returned.
pub struct ReleasesHaveProvenance {
    settings: ProvenanceSettings,
}

impl ReleasesHaveProvenance {
    pub fn new(settings: ProvenanceSettings) -> Self {
        Self { settings }
    }

    /// Scan `releases` and return the findings with the probe identifier.
    ///
    /// `None` means the snapshot carried no release data and is rejected;
    /// an empty slice is valid and yields the not-applicable finding.
    pub fn scan(
        &self,
        releases: Option<&[Release]>,
        catalog: &dyn RuleCatalog,
    ) -> Result<(Vec<Finding>, &'static str)> {
        let releases =
            releases.ok_or_else(|| ProbeError::InvalidInput("release snapshot is absent".into()))?;

        let mut findings = Vec::new();
        let mut examined = 0usize;

        for release in releases {
            if !release.has_assets() {
                tracing::debug!(tag = %release.tag_name, "release has no assets, skipping");
                continue;
            }
            examined += 1;

            let finding = match self.provenance_asset(release) {
                Some(asset) => positive_finding(catalog, release, asset)?,
                None => negative_finding(catalog, release)?,
            };
            let outcome = finding.outcome;
            findings.push(finding);

            if self.lookback_reached(examined, outcome) {
                tracing::debug!(examined, tag = %release.tag_name, "look-back bound reached");
                break;
            }
        }

        if findings.is_empty() {
            findings.push(Finding::from_catalog(
                catalog,
                PROBE,
                "no releases found.",
                None,
                Outcome::NotApplicable,
            )?);
        }

        Ok((findings, PROBE))
    }

    /// First asset, in listing order, whose name ends in a provenance suffix.
    fn provenance_asset<'a>(&self, release: &'a Release) -> Option<&'a Asset> {
        release.assets.iter().find(|asset| {
            self.settings
                .provenance_extensions
                .iter()
                .any(|suffix| asset.name.ends_with(suffix.as_str()))
        })
    }

    fn lookback_reached(&self, examined: usize, outcome: Outcome) -> bool {
        if self.settings.lookback == 0 || examined < self.settings.lookback {
            return false;
        }
        match self.settings.lookback_mode {
            LookBackMode::NegativeOnly => outcome == Outcome::Negative,
            LookBackMode::AnyOutcome => true,
        }
    }
}

impl Default for ReleasesHaveProvenance {
    fn default() -> Self {
        Self::new(ProvenanceSettings::default())
    }
}

impl Probe for ReleasesHaveProvenance {
    fn id(&self) -> &'static str {
        PROBE
    }

    fn run(
        &self,
        snapshot: &ReleaseSnapshot,
        catalog: &dyn RuleCatalog,
    ) -> Result<(Vec<Finding>, &'static str)> {
        self.scan(snapshot.releases(), catalog)
    }
}

fn positive_finding(catalog: &dyn RuleCatalog, release: &Release, asset: &Asset) -> Result<Finding> {
    let finding = Finding::from_catalog(
        catalog,
        PROBE,
        format!("provenance for release artifact: {}", asset.name),
        Some(Location::url(&asset.url)),
        Outcome::Positive,
    )?
    .with_value(&release.tag_name, ValueKind::ReleaseTag)
    .with_value(&asset.name, ValueKind::ReleaseAssetName);
    Ok(finding)
}

fn negative_finding(catalog: &dyn RuleCatalog, release: &Release) -> Result<Finding> {
    let finding = Finding::from_catalog(
        catalog,
        PROBE,
        format!("release artifact {} does not have provenance", release.tag_name),
        Some(Location::url(&release.url)),
        Outcome::Negative,
    )?
    .with_value(&release.tag_name, ValueKind::ReleaseTag);
    Ok(finding)
}
