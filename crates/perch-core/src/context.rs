use std::sync::Arc;

use crate::args::{Arguments, RoomRef, UserRef};
use crate::capabilities::{Brain, ReplySink, RoomOps, SecretStore};
use crate::error::Result;

/// External service endpoints used by skills that call out to the network.
/// Carried in the context so tests and self-hosters can repoint them.
#[derive(Debug, Clone)]
pub struct ServiceEndpoints {
    /// Base URL of the Twitter REST API (direct-credential tweet skill).
    pub twitter_api_base: String,
    /// Trigger URL of the Twitter client proxy (PIN-auth tweet skill).
    pub twitter_proxy_url: String,
}

impl Default for ServiceEndpoints {
    fn default() -> Self {
        Self {
            twitter_api_base: "https://api.twitter.com/1.1".into(),
            twitter_proxy_url: "https://hooks.perch.chat/twitter-client-proxy/trigger".into(),
        }
    }
}

/// Everything a skill invocation gets from the host, passed explicitly.
///
/// One context is built per incoming command and handed to exactly one
/// skill. All capability handles are shared trait objects so hosts, the
/// console harness, and tests can wire their own implementations.
#[derive(Clone)]
pub struct SkillContext {
    /// How the bot is addressed in chat, e.g. "perch" for `@perch`.
    pub bot_name: String,
    /// Name of the skill being invoked (for usage hints).
    pub skill_name: String,
    /// The invoking user.
    pub user: UserRef,
    /// The room the command came from.
    pub room: RoomRef,
    /// Raw argument string, as typed after the skill name.
    pub arguments: String,
    /// Tokenized arguments with room/mention classification.
    pub tokens: Arguments,
    pub services: ServiceEndpoints,
    pub http: reqwest::Client,
    pub replies: Arc<dyn ReplySink>,
    pub brain: Arc<dyn Brain>,
    pub secrets: Arc<dyn SecretStore>,
    pub rooms: Arc<dyn RoomOps>,
}

impl SkillContext {
    pub fn new(
        bot_name: impl Into<String>,
        user: UserRef,
        room: RoomRef,
        replies: Arc<dyn ReplySink>,
        brain: Arc<dyn Brain>,
        secrets: Arc<dyn SecretStore>,
        rooms: Arc<dyn RoomOps>,
    ) -> Self {
        Self {
            bot_name: bot_name.into(),
            skill_name: String::new(),
            user,
            room,
            arguments: String::new(),
            tokens: Arguments::default(),
            services: ServiceEndpoints::default(),
            http: reqwest::Client::new(),
            replies,
            brain,
            secrets,
            rooms,
        }
    }

    /// Set the skill name used in usage hints.
    pub fn with_skill_name(mut self, name: impl Into<String>) -> Self {
        self.skill_name = name.into();
        self
    }

    /// Set the raw argument string and derive the tokenized form from it.
    pub fn with_arguments(mut self, raw: impl Into<String>) -> Self {
        self.arguments = raw.into();
        self.tokens = Arguments::tokenize(&self.arguments);
        self
    }

    /// Override the tokenized arguments (hosts with richer tokenizers).
    pub fn with_tokens(mut self, tokens: Arguments) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn with_services(mut self, services: ServiceEndpoints) -> Self {
        self.services = services;
        self
    }

    pub fn with_http(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    pub async fn reply(&self, text: impl AsRef<str>) -> Result<()> {
        self.replies.reply(text.as_ref()).await
    }

    pub async fn reply_with_image(
        &self,
        image_url: impl AsRef<str>,
        text: impl AsRef<str>,
    ) -> Result<()> {
        self.replies
            .reply_with_image(image_url.as_ref(), text.as_ref())
            .await
    }

    /// The standard "go read the help" hint for this skill.
    pub fn help_hint(&self) -> String {
        format!(
            "Try `@{} help {}` to learn how to use the `{}` skill.",
            self.bot_name, self.skill_name, self.skill_name
        )
    }
}
