use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Root configuration — maps to `perch.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PerchConfig {
    pub bot: BotConfig,
    pub brain: BrainConfig,
    pub http: HttpConfig,
    pub services: ServicesConfig,
    /// Secrets for the console harness (`connstring`, `consumerkey`, ...).
    /// A real chat host injects its own secret store instead.
    pub secrets: HashMap<String, String>,
    pub logging: LoggingConfig,
}

// ── Bot ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// How the bot is addressed in chat, e.g. "perch" for `@perch tweet`.
    pub name: String,
    /// Identity used by the console for user-scoped brain entries.
    pub console_user: String,
    /// Identity used by the console for room-scoped brain entries.
    pub console_room: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "perch".into(),
            console_user: "console".into(),
            console_room: "console".into(),
        }
    }
}

// ── Brain ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrainConfig {
    /// Path to the SQLite brain database.
    pub db_path: PathBuf,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            db_path: default_home_file("brain.db"),
        }
    }
}

// ── HTTP ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User-Agent sent on outgoing requests. The default imitates Chrome so
    /// link checks get real answers from UA-sensitive sites.
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/70.0.3538.77 Safari/537.36"
                .into(),
        }
    }
}

// ── Services ───────────────────────────────────────────────────

/// External service endpoints used by networked skills.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicesConfig {
    /// Base URL of the Twitter REST API (direct-credential `tweet` skill).
    pub twitter_api_base: String,
    /// Trigger URL of the Twitter client proxy (`tweet-proxy` skill).
    pub twitter_proxy_url: String,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        let defaults = perch_core::ServiceEndpoints::default();
        Self {
            twitter_api_base: defaults.twitter_api_base,
            twitter_proxy_url: defaults.twitter_proxy_url,
        }
    }
}

impl ServicesConfig {
    pub fn endpoints(&self) -> perch_core::ServiceEndpoints {
        perch_core::ServiceEndpoints {
            twitter_api_base: self.twitter_api_base.clone(),
            twitter_proxy_url: self.twitter_proxy_url.clone(),
        }
    }
}

// ── Logging ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    pub level: String,
    /// Output format: "pretty" or "compact".
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

impl PerchConfig {
    /// Validate the config. Returns warnings; errors fail the load.
    pub fn validate(&self) -> Result<Vec<String>, String> {
        let mut warnings = Vec::new();

        if self.bot.name.trim().is_empty() {
            return Err("bot.name must not be empty".into());
        }

        if !matches!(
            self.logging.level.as_str(),
            "trace" | "debug" | "info" | "warn" | "error"
        ) {
            warnings.push(format!(
                "logging.level '{}' is not a known level, tracing will fall back to 'info'",
                self.logging.level
            ));
        }

        if self.services.twitter_proxy_url.trim().is_empty() {
            warnings.push(
                "services.twitter_proxy_url is empty — the tweet-proxy skill cannot run".into(),
            );
        }

        Ok(warnings)
    }
}

fn default_home_file(name: &str) -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".perch")
        .join(name)
}
