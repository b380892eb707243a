//! Console implementations of the host capabilities: replies go to stdout,
//! secrets come from the config file, and room operations report that the
//! console has no rooms to manage.

use std::collections::HashMap;

use async_trait::async_trait;

use perch_core::{PerchError, ReplySink, Result, RoomOps, RoomRef, SecretStore, UserRef};

/// Prints replies to stdout the way a chat surface would show them.
pub struct StdoutSink;

#[async_trait]
impl ReplySink for StdoutSink {
    async fn reply(&self, text: &str) -> Result<()> {
        println!("{text}");
        Ok(())
    }

    async fn reply_with_image(&self, image_url: &str, text: &str) -> Result<()> {
        println!("{text}");
        if !image_url.is_empty() {
            println!("{image_url}");
        }
        Ok(())
    }
}

/// Secrets from the `[secrets]` table of perch.toml.
pub struct ConfigSecrets {
    secrets: HashMap<String, String>,
}

impl ConfigSecrets {
    pub fn new(secrets: HashMap<String, String>) -> Self {
        Self { secrets }
    }
}

impl SecretStore for ConfigSecrets {
    fn read(&self, name: &str) -> Option<String> {
        self.secrets.get(name).cloned()
    }
}

/// The console has no chat platform behind it, so every room operation
/// fails with a message the `room` skill quotes back to the user.
pub struct ConsoleRooms;

const NO_ROOMS: &str = "room operations are not available in the console";

#[async_trait]
impl RoomOps for ConsoleRooms {
    async fn set_topic(&self, _room: &RoomRef, _topic: &str) -> Result<()> {
        Err(PerchError::room("set_topic", NO_ROOMS))
    }

    async fn set_purpose(&self, _room: &RoomRef, _purpose: &str) -> Result<()> {
        Err(PerchError::room("set_purpose", NO_ROOMS))
    }

    async fn create(&self, _name: &str) -> Result<RoomRef> {
        Err(PerchError::room("create", NO_ROOMS))
    }

    async fn archive(&self, _room: &RoomRef) -> Result<()> {
        Err(PerchError::room("archive", NO_ROOMS))
    }

    async fn invite(&self, _room: &RoomRef, _users: &[UserRef]) -> Result<()> {
        Err(PerchError::room("invite", NO_ROOMS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_secrets_lookup() {
        let secrets = ConfigSecrets::new(HashMap::from([(
            "connstring".to_string(),
            "/tmp/app.db".to_string(),
        )]));
        assert_eq!(secrets.read("connstring").as_deref(), Some("/tmp/app.db"));
        assert_eq!(secrets.read("missing"), None);
    }

    #[tokio::test]
    async fn console_rooms_always_decline() {
        let rooms = ConsoleRooms;
        let room = RoomRef::new("C1", "ops");
        let err = rooms.set_topic(&room, "x").await.unwrap_err();
        assert!(err.to_string().contains("not available in the console"));
    }
}
