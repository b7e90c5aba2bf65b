use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{info, warn};

use crate::error::{PaddockError, Result};

/// Path value that opens a private in-memory database instead of a file.
pub const IN_MEMORY_PATH: &str = ":memory:";

/// Top-level configuration for the listing services.
///
/// One store section per entity domain, so races and sports events can live
/// in separate database files (the default) or share one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaddockConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default = "StoreConfig::racing", deserialize_with = "racing_section")]
    pub racing: StoreConfig,
    #[serde(default = "StoreConfig::sports", deserialize_with = "sports_section")]
    pub sports: StoreConfig,
}

impl PaddockConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: PaddockConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| PaddockError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Per-domain store settings.
///
/// Keys omitted from a `[racing]` or `[sports]` table take that section's
/// own defaults, see [`StoreConfig::racing`] and [`StoreConfig::sports`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreConfig {
    /// SQLite file path, or `:memory:`.
    pub db_path: String,
    /// Seed dummy data on first `init`.
    pub seed: bool,
    /// Number of rows to seed.
    pub seed_count: u32,
}

/// A store table as written in the file; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct StoreSection {
    db_path: Option<String>,
    seed: Option<bool>,
    seed_count: Option<u32>,
}

impl StoreSection {
    fn over(self, defaults: StoreConfig) -> StoreConfig {
        StoreConfig {
            db_path: self.db_path.unwrap_or(defaults.db_path),
            seed: self.seed.unwrap_or(defaults.seed),
            seed_count: self.seed_count.unwrap_or(defaults.seed_count),
        }
    }
}

fn racing_section<'de, D>(deserializer: D) -> std::result::Result<StoreConfig, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(StoreSection::deserialize(deserializer)?.over(StoreConfig::racing()))
}

fn sports_section<'de, D>(deserializer: D) -> std::result::Result<StoreConfig, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(StoreSection::deserialize(deserializer)?.over(StoreConfig::sports()))
}

impl StoreConfig {
    pub fn racing() -> Self {
        Self {
            db_path: "racing.db".to_string(),
            seed: true,
            seed_count: 100,
        }
    }

    pub fn sports() -> Self {
        Self {
            db_path: "sports.db".to_string(),
            seed: true,
            seed_count: 200,
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.db_path == IN_MEMORY_PATH
    }
}

impl Default for PaddockConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            racing: StoreConfig::racing(),
            sports: StoreConfig::sports(),
        }
    }
}
