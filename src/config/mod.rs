//! @acp:module "Configuration"
//! @acp:summary "Project configuration loading and defaults"
//! @acp:domain cli
//! @acp:layer config

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::reconcile::ReconcileOptions;
use crate::store::FileStore;

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = ".bubble.config.json";

fn default_version() -> String {
    "1.0.0".to_string()
}

/// @acp:summary "Main configuration structure"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Config format version
    #[serde(default = "default_version")]
    pub version: String,

    /// Directory of the key/value store (defaults to the user data dir)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<PathBuf>,

    /// Custom market catalog replacing the built-in one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,

    /// Edit reconciliation variants
    #[serde(default)]
    pub reconcile: ReconcileOptions,

    /// Scenario analysis thresholds
    #[serde(default)]
    pub insight: InsightConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            store: None,
            catalog: None,
            reconcile: ReconcileOptions::default(),
            insight: InsightConfig::default(),
        }
    }
}

impl Config {
    /// @acp:summary "Load config from a JSON file"
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// @acp:summary "Save config to a file"
    pub fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// @acp:summary "Load from `path`, or defaults when the file does not exist"
    ///
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No config at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Resolved store directory
    pub fn store_dir(&self) -> PathBuf {
        self.store.clone().unwrap_or_else(FileStore::default_dir)
    }
}

fn default_stance_threshold() -> f64 {
    5.0
}

fn default_significant_diff() -> f64 {
    10.0
}

/// @acp:summary "Thresholds for scenario commentary"
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightConfig {
    /// Score gap beyond which the user's stance differs from the market
    #[serde(default = "default_stance_threshold")]
    pub stance_threshold: f64,

    /// Category score gap that counts as a significant adjustment
    #[serde(default = "default_significant_diff")]
    pub significant_diff: f64,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            stance_threshold: default_stance_threshold(),
            significant_diff: default_significant_diff(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.insight.stance_threshold, 5.0);
        assert_eq!(config.insight.significant_diff, 10.0);
        assert!(!config.reconcile.derive_weight_from_factors);
    }

    #[test]
    fn test_partial_config() {
        let json = r#"{"store":"/tmp/bubble","reconcile":{"rescaleOverridesOnWeight":true},"insight":{"significantDiff":4}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.store_dir(), PathBuf::from("/tmp/bubble"));
        assert!(config.reconcile.rescale_overrides_on_weight);
        assert_eq!(config.insight.significant_diff, 4.0);
        assert_eq!(config.insight.stance_threshold, 5.0);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let config = Config {
            catalog: Some(PathBuf::from("custom.json")),
            ..Default::default()
        };
        config.save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_or_default_reads_existing_and_rejects_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        let mut config = Config::default();
        config.insight.stance_threshold = 2.5;
        config.save(&path).unwrap();
        assert_eq!(Config::load_or_default(&path).unwrap(), config);

        std::fs::write(&path, "{ not json").unwrap();
        assert!(Config::load_or_default(&path).is_err());
    }

}
