use async_trait::async_trait;

use crate::args::{RoomRef, UserRef};
use crate::error::Result;

/// Where skill replies go: the chat surface of the invoking room.
#[async_trait]
pub trait ReplySink: Send + Sync {
    /// Send a plain-text reply to the chat.
    async fn reply(&self, text: &str) -> Result<()>;

    /// Send a reply with an attached image. Sinks without attachment
    /// support append the image URL to the text.
    async fn reply_with_image(&self, image_url: &str, text: &str) -> Result<()> {
        self.reply(&format!("{text}\n{image_url}")).await
    }
}

/// The host's persistent key-value store, already scoped to a user or room.
///
/// Plain string keys and values, last write wins. No transactions and no
/// cross-invocation locking.
#[async_trait]
pub trait Brain: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn write(&self, key: &str, value: &str) -> Result<()>;
    async fn delete(&self, key: &str) -> Result<()>;
}

/// Read-only access to operator-configured secrets.
pub trait SecretStore: Send + Sync {
    fn read(&self, name: &str) -> Option<String>;
}

/// Room management operations provided by the host.
///
/// Errors carry the host's message verbatim; handlers quote it back to
/// the chat rather than propagating.
#[async_trait]
pub trait RoomOps: Send + Sync {
    async fn set_topic(&self, room: &RoomRef, topic: &str) -> Result<()>;
    async fn set_purpose(&self, room: &RoomRef, purpose: &str) -> Result<()>;
    async fn create(&self, name: &str) -> Result<RoomRef>;
    async fn archive(&self, room: &RoomRef) -> Result<()>;
    async fn invite(&self, room: &RoomRef, users: &[UserRef]) -> Result<()>;
}
