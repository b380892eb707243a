//! In-memory capability implementations for tests and offline development.
//!
//! Shipped as a regular module (not behind `cfg(test)`) so every crate in
//! the workspace can build skill contexts against them.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::args::{RoomRef, UserRef};
use crate::capabilities::{Brain, ReplySink, RoomOps, SecretStore};
use crate::context::SkillContext;
use crate::error::{PerchError, Result};

/// One captured reply.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub image_url: Option<String>,
}

/// A reply sink that records every reply for later assertions.
#[derive(Default)]
pub struct RecordingSink {
    replies: Mutex<Vec<Reply>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All reply texts, in send order.
    pub fn texts(&self) -> Vec<String> {
        self.replies.lock().iter().map(|r| r.text.clone()).collect()
    }

    pub fn replies(&self) -> Vec<Reply> {
        self.replies.lock().clone()
    }

    pub fn reply_count(&self) -> usize {
        self.replies.lock().len()
    }
}

#[async_trait]
impl ReplySink for RecordingSink {
    async fn reply(&self, text: &str) -> Result<()> {
        self.replies.lock().push(Reply {
            text: text.to_string(),
            image_url: None,
        });
        Ok(())
    }

    async fn reply_with_image(&self, image_url: &str, text: &str) -> Result<()> {
        self.replies.lock().push(Reply {
            text: text.to_string(),
            image_url: Some(image_url.to_string()),
        });
        Ok(())
    }
}

/// A brain backed by a plain HashMap.
#[derive(Default)]
pub struct MemoryBrain {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBrain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            entries: Mutex::new(entries.into_iter().collect()),
        }
    }
}

#[async_trait]
impl Brain for MemoryBrain {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// A fixed secret map.
#[derive(Default)]
pub struct StaticSecrets {
    secrets: HashMap<String, String>,
}

impl StaticSecrets {
    pub fn new<K, V>(secrets: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            secrets: secrets
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

impl SecretStore for StaticSecrets {
    fn read(&self, name: &str) -> Option<String> {
        self.secrets.get(name).cloned()
    }
}

/// A recorded room-management call.
#[derive(Debug, Clone, PartialEq)]
pub enum RoomCall {
    SetTopic { room: String, topic: String },
    SetPurpose { room: String, purpose: String },
    Create { name: String },
    Archive { room: String },
    Invite { room: String, users: Vec<String> },
}

/// Room operations that record calls and optionally fail with a scripted
/// host error message.
#[derive(Default)]
pub struct MockRooms {
    calls: Mutex<Vec<RoomCall>>,
    fail_with: Mutex<Option<String>>,
}

impl MockRooms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail with the given message.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.fail_with.lock() = Some(message.into());
    }

    pub fn calls(&self) -> Vec<RoomCall> {
        self.calls.lock().clone()
    }

    fn check(&self, op: &str) -> Result<()> {
        if let Some(msg) = self.fail_with.lock().clone() {
            return Err(PerchError::room(op, msg));
        }
        Ok(())
    }
}

#[async_trait]
impl RoomOps for MockRooms {
    async fn set_topic(&self, room: &RoomRef, topic: &str) -> Result<()> {
        self.calls.lock().push(RoomCall::SetTopic {
            room: room.name.clone(),
            topic: topic.to_string(),
        });
        self.check("set_topic")
    }

    async fn set_purpose(&self, room: &RoomRef, purpose: &str) -> Result<()> {
        self.calls.lock().push(RoomCall::SetPurpose {
            room: room.name.clone(),
            purpose: purpose.to_string(),
        });
        self.check("set_purpose")
    }

    async fn create(&self, name: &str) -> Result<RoomRef> {
        self.calls.lock().push(RoomCall::Create {
            name: name.to_string(),
        });
        self.check("create")?;
        Ok(RoomRef::new(format!("C-{name}"), name))
    }

    async fn archive(&self, room: &RoomRef) -> Result<()> {
        self.calls.lock().push(RoomCall::Archive {
            room: room.name.clone(),
        });
        self.check("archive")
    }

    async fn invite(&self, room: &RoomRef, users: &[UserRef]) -> Result<()> {
        self.calls.lock().push(RoomCall::Invite {
            room: room.name.clone(),
            users: users.iter().map(|u| u.name.clone()).collect(),
        });
        self.check("invite")
    }
}

/// A ready-to-use context wired entirely to in-memory doubles.
/// Returns the context plus the sink and rooms handles for assertions.
pub fn test_context(skill_name: &str, raw_args: &str) -> TestContext {
    let sink = Arc::new(RecordingSink::new());
    let brain = Arc::new(MemoryBrain::new());
    let secrets = Arc::new(StaticSecrets::empty());
    let rooms = Arc::new(MockRooms::new());

    let ctx = SkillContext::new(
        "perch",
        UserRef::new("U100", "tester"),
        RoomRef::new("C100", "lounge"),
        sink.clone(),
        brain.clone(),
        secrets,
        rooms.clone(),
    )
    .with_skill_name(skill_name)
    .with_arguments(raw_args);

    TestContext {
        ctx,
        sink,
        brain,
        rooms,
    }
}

/// Bundle returned by [`test_context`].
pub struct TestContext {
    pub ctx: SkillContext,
    pub sink: Arc<RecordingSink>,
    pub brain: Arc<MemoryBrain>,
    pub rooms: Arc<MockRooms>,
}

impl TestContext {
    /// Swap the secret store (contexts are cheap to rebuild).
    pub fn with_secrets(mut self, secrets: StaticSecrets) -> Self {
        self.ctx.secrets = Arc::new(secrets);
        self
    }
}
