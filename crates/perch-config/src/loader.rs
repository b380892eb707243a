use std::path::{Path, PathBuf};

use tracing::{info, warn};

use perch_core::{PerchError, Result};

use crate::schema::PerchConfig;

/// Loads the Perch configuration from disk with env-var overrides.
pub struct ConfigLoader {
    config: PerchConfig,
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Resolve the config path: explicit path > PERCH_CONFIG env > ~/.perch/perch.toml
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(p) = explicit {
            return p.to_path_buf();
        }
        if let Ok(p) = std::env::var("PERCH_CONFIG") {
            return PathBuf::from(p);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".perch")
            .join("perch.toml")
    }

    /// Load the config from disk, falling back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = Self::resolve_path(path);
        let config = if config_path.exists() {
            info!(?config_path, "loading configuration");
            let raw = std::fs::read_to_string(&config_path)?;
            toml::from_str::<PerchConfig>(&raw).map_err(|e| {
                PerchError::Config(format!("failed to parse {}: {}", config_path.display(), e))
            })?
        } else {
            warn!(?config_path, "config file not found, using defaults");
            PerchConfig::default()
        };

        let config = Self::apply_env_overrides(config);

        match config.validate() {
            Ok(warnings) => {
                for w in &warnings {
                    warn!("{}", w);
                }
            }
            Err(e) => {
                return Err(PerchError::Config(e));
            }
        }

        Ok(Self {
            config,
            config_path,
        })
    }

    /// Get a snapshot of the loaded config.
    pub fn get(&self) -> PerchConfig {
        self.config.clone()
    }

    /// Path the config was loaded from (or would be loaded from).
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Apply env var overrides (PERCH_BOT_NAME, PERCH_BRAIN_DB, PERCH_LOG_LEVEL).
    fn apply_env_overrides(mut config: PerchConfig) -> PerchConfig {
        if let Ok(v) = std::env::var("PERCH_BOT_NAME") {
            config.bot.name = v;
        }
        if let Ok(v) = std::env::var("PERCH_BRAIN_DB") {
            config.brain.db_path = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("PERCH_LOG_LEVEL") {
            config.logging.level = v;
        }
        if let Ok(v) = std::env::var("PERCH_TWITTER_PROXY_URL") {
            config.services.twitter_proxy_url = v;
        }
        config
    }
}
