//! Runtime configuration.
//!
//! [`FoodlinkConfig::load`] reads `config/config.toml` when present and then overlays
//! `FOODLINK__*` environment variables, e.g. `FOODLINK__DATABASE__PATH` or
//! `FOODLINK__DATASET__DIR`. Every field has a default, so an empty environment yields
//! the stock layout: `dataset/food_wastage.db` next to the four CSVs in `dataset/`.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "config/config.toml";
const ENV_PREFIX: &str = "FOODLINK";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct FoodlinkConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub dataset: DatasetConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

impl DatabaseConfig {
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

/// Where the CSV sources live
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatasetConfig {
    #[serde(default = "default_dataset_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_providers_file")]
    pub providers_file: String,
    #[serde(default = "default_receivers_file")]
    pub receivers_file: String,
    #[serde(default = "default_listings_file")]
    pub listings_file: String,
    #[serde(default = "default_claims_file")]
    pub claims_file: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            dir: default_dataset_dir(),
            providers_file: default_providers_file(),
            receivers_file: default_receivers_file(),
            listings_file: default_listings_file(),
            claims_file: default_claims_file(),
        }
    }
}

impl DatasetConfig {
    /// A dataset rooted at `dir` with the stock file names
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Self::default()
        }
    }

    pub fn providers_path(&self) -> PathBuf {
        self.dir.join(&self.providers_file)
    }

    pub fn receivers_path(&self) -> PathBuf {
        self.dir.join(&self.receivers_file)
    }

    pub fn listings_path(&self) -> PathBuf {
        self.dir.join(&self.listings_file)
    }

    pub fn claims_path(&self) -> PathBuf {
        self.dir.join(&self.claims_file)
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("dataset/food_wastage.db")
}

fn default_busy_timeout_ms() -> u64 {
    5_000
}

fn default_dataset_dir() -> PathBuf {
    PathBuf::from("dataset")
}

fn default_providers_file() -> String {
    "providers_data.csv".to_string()
}

fn default_receivers_file() -> String {
    "receivers_data.csv".to_string()
}

fn default_listings_file() -> String {
    "food_listings_data.csv".to_string()
}

fn default_claims_file() -> String {
    "claims_data.csv".to_string()
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

impl FoodlinkConfig {
    /// Load from `config/config.toml`, falling back to env vars.
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(env_source());

        let settings = match builder.build() {
            Ok(cfg) => cfg,
            Err(err) => {
                // File exists but is unreadable; keep going with env only
                if Path::new(CONFIG_FILE).exists() {
                    log::warn!(
                        "failed to load {}, falling back to env. Error: {}",
                        CONFIG_FILE,
                        err
                    );
                }
                Config::builder().add_source(env_source()).build().map_err(|env_err| {
                    ConfigError::Message(format!(
                        "Failed to load configuration from file and env: {}, then env-only error: {}",
                        err, env_err
                    ))
                })?
            }
        };

        settings.try_deserialize::<FoodlinkConfig>().map_err(|e| {
            ConfigError::Message(format!(
                "Configuration could not be loaded from file or environment: {}",
                e
            ))
        })
    }

    /// Load from an explicit TOML file, still honouring env overrides
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_stock_layout() {
        let cfg = FoodlinkConfig::default();
        assert_eq!(cfg.database.path, PathBuf::from("dataset/food_wastage.db"));
        assert_eq!(cfg.database.busy_timeout(), Duration::from_secs(5));
        assert_eq!(
            cfg.dataset.listings_path(),
            PathBuf::from("dataset/food_listings_data.csv")
        );
    }

    #[test]
    fn test_load_from_file_keeps_unset_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[database]\npath = \"/tmp/foodlink-test.db\"\n\n[dataset]\ndir = \"/srv/data\"\nclaims_file = \"claims.csv\""
        )
        .unwrap();

        let cfg = FoodlinkConfig::load_from(file.path()).unwrap();
        assert_eq!(cfg.database.path, PathBuf::from("/tmp/foodlink-test.db"));
        assert_eq!(cfg.database.busy_timeout_ms, 5_000);
        assert_eq!(cfg.dataset.claims_path(), PathBuf::from("/srv/data/claims.csv"));
        assert_eq!(cfg.dataset.providers_file, "providers_data.csv");
    }

    #[test]
    fn test_in_dir_uses_stock_names() {
        let dataset = DatasetConfig::in_dir("/data");
        assert_eq!(dataset.receivers_path(), PathBuf::from("/data/receivers_data.csv"));
    }
}
