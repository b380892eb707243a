//! The direct-credential tweet skill: every call is signed locally with
//! static OAuth1 credentials from the secret store.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use perch_core::{PerchError, Result, Skill, SkillContext};

use super::commands::{run_tweet_command, TweetTransport};
use super::oauth1::{self, OAuth1Credentials};

pub struct TweetSkill;

struct DirectTransport {
    creds: OAuth1Credentials,
}

#[async_trait]
impl TweetTransport for DirectTransport {
    async fn send(
        &self,
        ctx: &SkillContext,
        action: &str,
        params: &[(&str, String)],
    ) -> Result<Value> {
        let url = format!("{}/{}", ctx.services.twitter_api_base, action);
        let query: Vec<(String, String)> = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();

        let full_url = if query.is_empty() {
            url.clone()
        } else {
            let qs = query
                .iter()
                .map(|(k, v)| format!("{}={}", k, oauth1::percent_encode(v)))
                .collect::<Vec<_>>()
                .join("&");
            format!("{url}?{qs}")
        };

        let auth = oauth1::authorization_header(&self.creds, "POST", &url, &query);
        debug!(action, "sending signed twitter request");

        let resp = ctx
            .http
            .post(&full_url)
            .header("Authorization", auth)
            .send()
            .await
            .map_err(|e| PerchError::http(format!("POST {action}"), e))?
            .error_for_status()
            .map_err(|e| PerchError::http(format!("POST {action}"), e))?;

        resp.json()
            .await
            .map_err(|e| PerchError::http(format!("decode {action}"), e))
    }
}

fn load_credentials(ctx: &SkillContext) -> Option<OAuth1Credentials> {
    Some(OAuth1Credentials {
        consumer_key: ctx.secrets.read("consumerkey")?,
        consumer_secret: ctx.secrets.read("consumersecret")?,
        access_token: ctx.secrets.read("accesstoken")?,
        access_token_secret: ctx.secrets.read("accesstokensecret")?,
    })
}

#[async_trait]
impl Skill for TweetSkill {
    fn name(&self) -> &str {
        "tweet"
    }

    fn description(&self) -> &str {
        "Post and manage tweets with credentials from the secret store"
    }

    fn usage(&self) -> &str {
        "tweet {text} — send a tweet\n\
         tweet length {text} — count the characters in your text\n\
         tweet RT {tweet link} — retweet\n\
         tweet reply {tweet link} {text} — reply to a tweet\n\
         tweet follow {username} — follow an account\n\
         tweet unfollow {username} — unfollow an account\n\
         tweet like {tweet link} — like a tweet (FAV and FAVE work too)"
    }

    async fn execute(&self, ctx: &SkillContext) -> Result<()> {
        let Some(creds) = load_credentials(ctx) else {
            ctx.reply(
                "A secret required for this skill to run has not been set. \
                 Please review and ensure all your secrets have been configured.",
            )
            .await?;
            return Ok(());
        };

        let words: Vec<&str> = ctx.arguments.split_whitespace().collect();
        if words.len() < 2 {
            ctx.reply(ctx.help_hint()).await?;
            return Ok(());
        }

        let cmd = words[0].to_uppercase();
        let param = words[1];
        let transport = DirectTransport { creds };
        run_tweet_command(ctx, &transport, &cmd, param, &words, &ctx.arguments).await
    }
}

#[cfg(test)]
mod tests {
    use perch_core::mock::{test_context, StaticSecrets};

    use super::*;

    fn full_secrets() -> StaticSecrets {
        StaticSecrets::new([
            ("consumerkey", "ck"),
            ("consumersecret", "cs"),
            ("accesstoken", "at"),
            ("accesstokensecret", "ats"),
        ])
    }

    #[tokio::test]
    async fn missing_secret_gets_corrective_reply() {
        let t = test_context("tweet", "hello world")
            .with_secrets(StaticSecrets::new([("consumerkey", "ck")]));
        TweetSkill.execute(&t.ctx).await.unwrap();

        let texts = t.sink.texts();
        assert_eq!(texts.len(), 1);
        assert!(texts[0].contains("A secret required for this skill"));
    }

    #[tokio::test]
    async fn single_word_input_replies_help() {
        let t = test_context("tweet", "hello").with_secrets(full_secrets());
        TweetSkill.execute(&t.ctx).await.unwrap();

        let texts = t.sink.texts();
        assert_eq!(texts.len(), 1);
        assert!(texts[0].contains("help tweet"));
    }

    #[tokio::test]
    async fn length_within_limit() {
        let raw = "length check out this tweet text";
        let t = test_context("tweet", raw).with_secrets(full_secrets());
        TweetSkill.execute(&t.ctx).await.unwrap();

        let texts = t.sink.texts();
        assert_eq!(texts.len(), 1);
        assert_eq!(
            texts[0],
            format!(
                ":white_check_mark: Your tweet is {} characters long.",
                raw.chars().count()
            )
        );
    }

    #[tokio::test]
    async fn length_over_limit_warns() {
        let raw = format!("length {}", "x".repeat(300));
        let t = test_context("tweet", &raw).with_secrets(full_secrets());
        TweetSkill.execute(&t.ctx).await.unwrap();

        let texts = t.sink.texts();
        assert_eq!(texts.len(), 1);
        assert!(texts[0].starts_with(":warning: Uh oh!"));
    }

    #[tokio::test]
    async fn rt_with_bad_link_never_hits_network() {
        // No local server is running; if the skill tried to send, it would
        // return an Err rather than the corrective reply.
        let mut t = test_context("tweet", "RT https://example.com/not-a-tweet")
            .with_secrets(full_secrets());
        t.ctx.services.twitter_api_base = "http://127.0.0.1:1".into();
        TweetSkill.execute(&t.ctx).await.unwrap();

        let texts = t.sink.texts();
        assert_eq!(
            texts,
            vec!["That doesn't look like a link to a valid Tweet.".to_string()]
        );
    }

    #[tokio::test]
    async fn reply_with_bad_link_replies_invalid() {
        let mut t =
            test_context("tweet", "reply https://example.com/nope hello").with_secrets(full_secrets());
        t.ctx.services.twitter_api_base = "http://127.0.0.1:1".into();
        TweetSkill.execute(&t.ctx).await.unwrap();

        assert_eq!(
            t.sink.texts(),
            vec!["That doesn't look like a valid Tweet.".to_string()]
        );
    }

    #[tokio::test]
    async fn send_path_failure_propagates() {
        // An unreachable API base makes the send fail; the error must
        // propagate instead of turning into a chat reply.
        let mut t = test_context("tweet", "follow haacked").with_secrets(full_secrets());
        t.ctx.services.twitter_api_base = "http://127.0.0.1:1".into();

        let result = TweetSkill.execute(&t.ctx).await;
        assert!(result.is_err());
        assert_eq!(t.sink.reply_count(), 0);
    }

    #[test]
    fn credentials_require_all_four_secrets() {
        let t = test_context("tweet", "x").with_secrets(StaticSecrets::new([
            ("consumerkey", "ck"),
            ("consumersecret", "cs"),
            ("accesstoken", "at"),
        ]));
        assert!(load_credentials(&t.ctx).is_none());

        let t2 = test_context("tweet", "x").with_secrets(full_secrets());
        let creds = load_credentials(&t2.ctx).unwrap();
        assert_eq!(creds.consumer_key, "ck");
        assert_eq!(creds.access_token_secret, "ats");
    }
}
