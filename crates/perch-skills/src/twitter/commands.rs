//! The command loop shared by both tweet variants.
//!
//! Command selection, link parsing, and reply texts are identical in the
//! direct and proxied skills; only the wire transport differs. The
//! transport seam carries one operation: POST to an API action with query
//! parameters and get the JSON result back.

use async_trait::async_trait;
use serde_json::Value;

use perch_core::{Result, SkillContext};

use super::links::{parse_tweet_link, prep_reply_text};
use super::oauth1::percent_encode;

/// How tweet commands reach the Twitter API.
#[async_trait]
pub trait TweetTransport: Send + Sync {
    /// POST to an API action (e.g. `statuses/update.json`) with query
    /// parameters, returning the parsed JSON response. HTTP failures
    /// propagate — the send path has no corrective reply.
    async fn send(
        &self,
        ctx: &SkillContext,
        action: &str,
        params: &[(&str, String)],
    ) -> Result<Value>;
}

/// Compose `action?k=v&...` with RFC 3986 escaping.
pub fn action_with_query(action: &str, params: &[(&str, String)]) -> String {
    if params.is_empty() {
        return action.to_string();
    }
    let query = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{action}?{query}")
}

/// Run one tweet command. `cmd` is the upper-cased first token, `param`
/// the second token, `words` the full token list, and `status_text` the
/// text the default branch posts (the proxy variant pre-escapes it).
pub async fn run_tweet_command(
    ctx: &SkillContext,
    transport: &dyn TweetTransport,
    cmd: &str,
    param: &str,
    words: &[&str],
    status_text: &str,
) -> Result<()> {
    match cmd {
        "RT" => match parse_tweet_link(param) {
            Some(tweet) => {
                transport
                    .send(
                        ctx,
                        &format!("statuses/retweet/{}.json", tweet.tweet_id),
                        &[],
                    )
                    .await?;
                ctx.reply(format!("Retweeted @{}!", tweet.screen_name)).await
            }
            None => {
                ctx.reply("That doesn't look like a link to a valid Tweet.")
                    .await
            }
        },
        "REPLY" => match parse_tweet_link(param) {
            Some(tweet) => {
                // words[0] is "reply", words[1] the tweet link.
                let body = words.get(2..).unwrap_or_default().join(" ");
                let reply_text = prep_reply_text(&tweet.screen_name, &body);
                transport
                    .send(
                        ctx,
                        "statuses/update.json",
                        &[
                            ("status", reply_text),
                            ("in_reply_to_status_id", tweet.tweet_id.clone()),
                        ],
                    )
                    .await?;
                ctx.reply(format!("Nice! I replied to {}'s tweet", tweet.screen_name))
                    .await
            }
            None => ctx.reply("That doesn't look like a valid Tweet.").await,
        },
        "FOLLOW" => {
            let results = transport
                .send(
                    ctx,
                    "friendships/create.json",
                    &[("screen_name", param.to_string())],
                )
                .await?;
            let name = results["name"].as_str().unwrap_or(param);
            ctx.reply(format!("Aww yeah! Followed {name}!")).await
        }
        "UNFOLLOW" => {
            let results = transport
                .send(
                    ctx,
                    "friendships/destroy.json",
                    &[("screen_name", param.to_string())],
                )
                .await?;
            let name = results["name"].as_str().unwrap_or(param);
            ctx.reply(format!("Okay, I unfollowed {name}.")).await
        }
        "LENGTH" => {
            // Counts the whole raw argument string, "length" included.
            let charcount = ctx.arguments.chars().count();
            if charcount <= 280 {
                ctx.reply(format!(
                    ":white_check_mark: Your tweet is {charcount} characters long."
                ))
                .await
            } else {
                ctx.reply(
                    ":warning: Uh oh! This is over 280 characters and might be too long. \
                     Try and see, I guess...",
                )
                .await
            }
        }
        "FAV" | "FAVE" | "LIKE" => match parse_tweet_link(param) {
            Some(tweet) => {
                transport
                    .send(
                        ctx,
                        "favorites/create.json",
                        &[("id", tweet.tweet_id.clone())],
                    )
                    .await?;
                ctx.reply(format!(
                    "Hot dog, I just liked {}'s tweet!",
                    tweet.screen_name
                ))
                .await
            }
            None => {
                ctx.reply("That doesn't look like a link to a valid Tweet.")
                    .await
            }
        },
        _ => {
            let results = transport
                .send(
                    ctx,
                    "statuses/update.json",
                    &[("status", status_text.to_string())],
                )
                .await?;
            let screen_name = results["user"]["screen_name"].as_str().unwrap_or_default();
            let tweet_id = results["id_str"]
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| results["id"].to_string());
            ctx.reply(format!(
                ":boom: just tweeted it! :point_right: https://twitter.com/{screen_name}/status/{tweet_id}"
            ))
            .await
        }
    }
}
