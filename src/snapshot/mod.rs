//! Pre-fetched release history of a project.
//!
//! Fetching is done elsewhere. Probes consume a `ReleaseSnapshot` that is
//! already fully materialized; this module only models it and loads it
//! from the JSON files produced by the fetch step.

pub mod release;

use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Result;

pub use release::{Asset, Release};

/// Release data for one repository.
///
/// `releases` is `None` when the fetch step produced no release data at
/// all, which is different from a repository with zero releases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseSnapshot {
    /// Repository the snapshot was taken from (e.g., "github.com/org/repo").
    #[serde(default)]
    pub repository: Option<String>,
    /// Releases, most recent first.
    #[serde(default)]
    pub releases: Option<Vec<Release>>,
}

impl ReleaseSnapshot {
    pub fn new(releases: Vec<Release>) -> Self {
        Self {
            repository: None,
            releases: Some(releases),
        }
    }

    /// Load a snapshot from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json(&content)?;
        tracing::debug!(
            path = %path.display(),
            releases = snapshot.releases.as_ref().map_or(0, Vec::len),
            "loaded release snapshot"
        );
        Ok(snapshot)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let snapshot: ReleaseSnapshot = serde_json::from_str(content)?;
        snapshot.warn_on_malformed_urls();
        Ok(snapshot)
    }

    pub fn releases(&self) -> Option<&[Release]> {
        self.releases.as_deref()
    }

    /// URLs are only evidence pointers, so bad ones are reported but kept.
    fn warn_on_malformed_urls(&self) {
        for release in self.releases.iter().flatten() {
            if !is_absolute_url(&release.url) {
                tracing::warn!(tag = %release.tag_name, url = %release.url, "release URL is not an absolute URL");
            }
            for asset in &release.assets {
                if !is_absolute_url(&asset.url) {
                    tracing::warn!(
                        tag = %release.tag_name,
                        asset = %asset.name,
                        url = %asset.url,
                        "asset URL is not an absolute URL"
                    );
                }
            }
        }
    }
}

fn is_absolute_url(s: &str) -> bool {
    Url::parse(s).is_ok()
}
