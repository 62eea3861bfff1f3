use serde::{Deserialize, Serialize};

/// A published release as reported by the source code host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// Tag the release was cut from (e.g., "v1.2.0").
    pub tag_name: String,
    /// Canonical URL of the release page.
    #[serde(default)]
    pub url: String,
    /// Downloadable assets, in the order the host lists them.
    #[serde(default)]
    pub assets: Vec<Asset>,
}

/// A file attached to a release.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

impl Release {
    pub fn new(tag_name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            url: url.into(),
            assets: Vec::new(),
        }
    }

    /// Append an asset, builder style.
    pub fn with_asset(mut self, name: impl Into<String>, url: impl Into<String>) -> Self {
        self.assets.push(Asset {
            name: name.into(),
            url: url.into(),
        });
        self
    }

    /// Releases without assets are never examined.
    pub fn has_assets(&self) -> bool {
        !self.assets.is_empty()
    }
}
