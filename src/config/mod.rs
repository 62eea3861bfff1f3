use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ProbeError, Result};
use crate::rules::policy::Policy;
use crate::rules::ProvenanceSettings;

/// Top-level configuration from `.relprov.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub probe: ProvenanceSettings,
    #[serde(default)]
    pub policy: Policy,
}

impl Config {
    /// Load config from a TOML file. Returns default if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.probe.provenance_extensions.is_empty() {
            return Err(ProbeError::Config(
                "probe.provenance_extensions must not be empty".into(),
            ));
        }
        if self.probe.provenance_extensions.iter().any(|e| e.is_empty()) {
            return Err(ProbeError::Config(
                "probe.provenance_extensions contains an empty suffix".into(),
            ));
        }
        Ok(())
    }

    /// Generate a starter config file.
    pub fn starter_toml() -> &'static str {
        r#"# relprov configuration

[probe]
# Stop after this many examined releases (0 = scan all).
lookback = 5

# When the bound is checked: "negative_only" stops at the first release
# lacking provenance once the bound is reached; "any_outcome" stops as soon
# as the bound is reached.
lookback_mode = "negative_only"

# Asset name suffixes that count as provenance attestations.
provenance_extensions = [".intoto.jsonl"]

[policy]
# Fail when any examined release lacks provenance.
fail_on_negative = true

# Fail when the project has no releases with assets.
fail_on_not_applicable = false
"#
    }
}
