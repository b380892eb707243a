//! The proxied tweet skill: every call goes through a remote trigger
//! endpoint as a JSON envelope `{endpoint, method, skill_secret}`. The
//! per-room secret comes from a PIN-based OAuth flow and lives in the
//! room-scoped brain.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use perch_core::{PerchError, Result, Skill, SkillContext};

use super::commands::{action_with_query, run_tweet_command, TweetTransport};
use super::links::{escape_double_mentions, has_unresolved_mention};

pub struct TweetProxySkill;

/// Brain key holding this room's proxy secret.
fn secret_key(ctx: &SkillContext) -> String {
    format!("{}|SKILL_SECRET", ctx.room.cache_key())
}

async fn call_proxy(ctx: &SkillContext, body: Value) -> Result<Value> {
    let resp = ctx
        .http
        .post(&ctx.services.twitter_proxy_url)
        .json(&body)
        .send()
        .await
        .map_err(|e| PerchError::http("POST twitter proxy", e))?
        .error_for_status()
        .map_err(|e| PerchError::http("POST twitter proxy", e))?;

    resp.json()
        .await
        .map_err(|e| PerchError::http("decode twitter proxy response", e))
}

struct ProxyTransport {
    skill_secret: String,
}

#[async_trait]
impl TweetTransport for ProxyTransport {
    async fn send(
        &self,
        ctx: &SkillContext,
        action: &str,
        params: &[(&str, String)],
    ) -> Result<Value> {
        let endpoint = action_with_query(action, params);
        debug!(%endpoint, "sending proxied twitter request");
        call_proxy(
            ctx,
            json!({
                "endpoint": endpoint,
                "method": "POST",
                "skill_secret": self.skill_secret,
            }),
        )
        .await
    }
}

/// Ask the proxy who is authorized for this room. Any failure reads as
/// "nobody": a revoked authorization surfaces as a proxy error, not a
/// clean response.
async fn get_user(ctx: &SkillContext, skill_secret: Option<&str>) -> Option<Value> {
    let result = call_proxy(
        ctx,
        json!({
            "endpoint": "account/verify_credentials.json",
            "method": "GET",
            "skill_secret": skill_secret,
        }),
    )
    .await;

    match result {
        Ok(Value::Null) => None,
        Ok(user) => Some(user),
        Err(_) => None,
    }
}

async fn reply_with_current_user(ctx: &SkillContext, skill_secret: Option<&str>) -> Result<()> {
    let user = get_user(ctx, skill_secret).await;
    match user
        .as_ref()
        .filter(|u| u["screen_name"].is_string())
    {
        Some(user) => {
            let username = user["screen_name"].as_str().unwrap_or_default();
            let image = user["profile_image_url_https"].as_str().unwrap_or_default();
            ctx.reply_with_image(
                image,
                format!(
                    "The twitter user [@{username}](https://twitter.com/{username}) \
                     is attached to this room."
                ),
            )
            .await
        }
        None => {
            ctx.reply(format!(
                "No Twitter user is authorized for this room or the authorization has \
                 been revoked. `@{} {} auth` to authorize a Twitter account",
                ctx.bot_name, ctx.skill_name
            ))
            .await
        }
    }
}

async fn initiate_auth(ctx: &SkillContext) -> Result<()> {
    let response = call_proxy(ctx, json!({ "endpoint": "auth" })).await?;
    let skill_secret = response["skill_secret"].as_str().unwrap_or_default();
    let auth_url = response["auth_url"].as_str().unwrap_or_default();

    ctx.brain.write(&secret_key(ctx), skill_secret).await?;
    ctx.reply(format!(
        "Please [click here]({auth_url}) to authenticate this skill with Twitter. \
         After you authenticate, tell me the pin like so: `@{} {} auth {{pin}}`",
        ctx.bot_name, ctx.skill_name
    ))
    .await
}

async fn confirm_pin(ctx: &SkillContext, pin: &str, skill_secret: Option<&str>) -> Result<()> {
    let response = call_proxy(
        ctx,
        json!({
            "endpoint": "pin",
            "pin": pin,
            "skill_secret": skill_secret,
        }),
    )
    .await?;

    if response["success"].as_bool().unwrap_or(false) {
        return reply_with_current_user(ctx, skill_secret).await;
    }

    match response["message"].as_str() {
        Some(message) => ctx.reply(message).await,
        // A failure without a message used to produce no reply at all;
        // answer with a generic refusal so every invocation replies.
        None => {
            ctx.reply("Twitter did not accept that PIN. Try `auth` again to restart authorization.")
                .await
        }
    }
}

#[async_trait]
impl Skill for TweetProxySkill {
    fn name(&self) -> &str {
        "tweet-proxy"
    }

    fn description(&self) -> &str {
        "Post and manage tweets through the Twitter client proxy with per-room PIN authorization"
    }

    fn usage(&self) -> &str {
        "tweet-proxy auth — authorize a Twitter account for this room\n\
         tweet-proxy auth {pin} — finish authorization with the PIN Twitter gave you\n\
         tweet-proxy auth user — show which account this room manages\n\
         tweet-proxy auth clear — forget this room's authorization\n\
         tweet-proxy {text} — send a tweet (plus RT/reply/follow/unfollow/length/like, \
         as in the `tweet` skill)"
    }

    async fn execute(&self, ctx: &SkillContext) -> Result<()> {
        let skill_secret = ctx.brain.get(&secret_key(ctx)).await?;
        let words: Vec<&str> = ctx.arguments.split_whitespace().collect();
        let cmd = words
            .first()
            .map(|w| w.to_uppercase())
            .unwrap_or_default();

        if cmd == "AUTH" {
            if words.len() == 1 {
                return initiate_auth(ctx).await;
            }
            return match words[1] {
                "clear" => {
                    ctx.brain.delete(&secret_key(ctx)).await?;
                    ctx.reply("Cleared authentication info for this room").await
                }
                "user" => reply_with_current_user(ctx, skill_secret.as_deref()).await,
                pin => confirm_pin(ctx, pin, skill_secret.as_deref()).await,
            };
        }

        if cmd == "USER" {
            return reply_with_current_user(ctx, skill_secret.as_deref()).await;
        }

        // Everything else needs the room to be authorized first.
        let Some(skill_secret) = skill_secret else {
            ctx.reply(format!(
                "To set up this skill, run `@{} {} auth` to authenticate with the \
                 Twitter account you want to manage with this skill from this room",
                ctx.bot_name, ctx.skill_name
            ))
            .await?;
            return Ok(());
        };

        if words.len() < 2 {
            ctx.reply(ctx.help_hint()).await?;
            return Ok(());
        }

        // Collapse the @@ escape hatch, then refuse text that still holds
        // an unresolved chat mention token — it would go out broken.
        let tweet_text = escape_double_mentions(&ctx.arguments);
        if cmd != "RT"
            && cmd != "REPLY"
            && cmd != "FOLLOW"
            && cmd != "UNFOLLOW"
            && cmd != "LENGTH"
            && cmd != "FAV"
            && cmd != "FAVE"
            && cmd != "LIKE"
            && has_unresolved_mention(&tweet_text)
        {
            ctx.reply(
                "Whoops, it looks like you intended to include a Twitter username that \
                 just happens to match a chat username. You can use `@@` in that case. \
                 For example, for Twitter user `@haacked` you can specify `@@haacked`",
            )
            .await?;
            return Ok(());
        }

        let transport = ProxyTransport { skill_secret };
        run_tweet_command(ctx, &transport, &cmd, words[1], &words, &tweet_text).await
    }
}
