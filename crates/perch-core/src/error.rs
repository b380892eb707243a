use thiserror::Error;

/// Unified error type for the Perch runtime.
///
/// User input problems are never errors — skills answer those with a
/// corrective chat reply. An `Err` from a skill means the invocation itself
/// failed and surfaces as an opaque host-level failure.
#[derive(Error, Debug)]
pub enum PerchError {
    // ── Skill errors ───────────────────────────────────────────
    #[error("skill error: {0}")]
    Skill(String),

    #[error("skill not found: {0}")]
    SkillNotFound(String),

    // ── Host capability errors ─────────────────────────────────
    #[error("brain error: {0}")]
    Brain(String),

    #[error("secret not set: {0}")]
    SecretNotFound(String),

    #[error("room operation failed: {op}: {reason}")]
    Room { op: String, reason: String },

    #[error("reply failed: {0}")]
    Reply(String),

    // ── External dependency errors ─────────────────────────────
    #[error("http request failed: {context}: {source}")]
    Http {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("query failed: {0}")]
    Query(String),

    // ── Config errors ──────────────────────────────────────────
    #[error("config error: {0}")]
    Config(String),

    // ── Generic wrappers ───────────────────────────────────────
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl PerchError {
    /// Wrap a reqwest error with a short description of what was being done.
    pub fn http(context: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Http {
            context: context.into(),
            source,
        }
    }

    /// A failed room operation, carrying the host's error message.
    pub fn room(op: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Room {
            op: op.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PerchError>;
