use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use rusqlite::Connection;
use tracing::info;

use perch_core::{Brain, PerchError, Result};

/// The shared brain database. Cheap to clone; all clones share one
/// connection behind a mutex.
#[derive(Clone)]
pub struct BrainStore {
    db: Arc<Mutex<Connection>>,
}

impl BrainStore {
    /// Open or create the brain database at the given path.
    pub fn open(path: &Path) -> Result<Self> {
        info!(?path, "opening brain store");

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path).map_err(|e| PerchError::Brain(e.to_string()))?;

        // WAL for concurrent readers
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")
            .map_err(|e| PerchError::Brain(e.to_string()))?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS brain (
                scope TEXT NOT NULL,
                key TEXT NOT NULL,
                value TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                PRIMARY KEY (scope, key)
            );
            ",
        )
        .map_err(|e| PerchError::Brain(e.to_string()))?;

        Ok(Self {
            db: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory database (for tests).
    pub fn open_in_memory() -> Result<Self> {
        Self::open(Path::new(":memory:"))
    }

    /// A [`Brain`] handle bound to one user or room scope.
    pub fn scoped(&self, scope: impl Into<String>) -> ScopedBrain {
        ScopedBrain {
            store: self.clone(),
            scope: scope.into(),
        }
    }

    pub fn get(&self, scope: &str, key: &str) -> Result<Option<String>> {
        let db = self.db.lock();
        let mut stmt = db
            .prepare("SELECT value FROM brain WHERE scope = ?1 AND key = ?2")
            .map_err(|e| PerchError::Brain(e.to_string()))?;
        let value = stmt
            .query_row(rusqlite::params![scope, key], |row| row.get::<_, String>(0))
            .ok();
        Ok(value)
    }

    /// Upsert by (scope, key); last write wins.
    pub fn write(&self, scope: &str, key: &str, value: &str) -> Result<()> {
        let db = self.db.lock();
        let now = chrono::Utc::now().to_rfc3339();
        db.execute(
            "INSERT INTO brain (scope, key, value, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)
             ON CONFLICT(scope, key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at",
            rusqlite::params![scope, key, value, now],
        )
        .map_err(|e| PerchError::Brain(e.to_string()))?;
        Ok(())
    }

    pub fn delete(&self, scope: &str, key: &str) -> Result<bool> {
        let db = self.db.lock();
        let rows = db
            .execute(
                "DELETE FROM brain WHERE scope = ?1 AND key = ?2",
                rusqlite::params![scope, key],
            )
            .map_err(|e| PerchError::Brain(e.to_string()))?;
        Ok(rows > 0)
    }

    /// All keys stored under a scope, sorted.
    pub fn keys(&self, scope: &str) -> Result<Vec<String>> {
        let db = self.db.lock();
        let mut stmt = db
            .prepare("SELECT key FROM brain WHERE scope = ?1 ORDER BY key")
            .map_err(|e| PerchError::Brain(e.to_string()))?;
        let keys = stmt
            .query_map(rusqlite::params![scope], |row| row.get::<_, String>(0))
            .map_err(|e| PerchError::Brain(e.to_string()))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(keys)
    }
}

/// A brain handle fixed to one scope, as handed to skills.
#[derive(Clone)]
pub struct ScopedBrain {
    store: BrainStore,
    scope: String,
}

impl ScopedBrain {
    pub fn scope(&self) -> &str {
        &self.scope
    }
}

#[async_trait]
impl Brain for ScopedBrain {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.store.get(&self.scope, key)
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        self.store.write(&self.scope, key, value)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.store.delete(&self.scope, key).map(|_| ())
    }
}
