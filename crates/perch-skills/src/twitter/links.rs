use std::sync::LazyLock;

use regex::Regex;

/// A tweet identified from a status link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TweetRef {
    pub screen_name: String,
    pub tweet_id: String,
}

// A representative tweet link: https://twitter.com/haacked/status/842543742523334656
static TWEET_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)twitter\.com/(.*)/status(?:es)?/([^/?]+)").expect("hardcoded regex compiles")
});

// Word-start `@@name` — the escape hatch for Twitter usernames that collide
// with chat mention syntax.
static DOUBLE_MENTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(^|\s)@@([a-zA-Z0-9_]{1,15})").expect("hardcoded regex compiles")
});

// An unresolved chat-platform mention token, e.g. `<@U12345>`.
static RAW_MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<@U.+?>").expect("hardcoded regex compiles"));

/// Try to extract the author and status id from a tweet link.
///
/// Returns `None` for anything without a `.../status(es)/{id}` segment —
/// the caller turns that into a "not a valid link" reply instead of an
/// error.
pub fn parse_tweet_link(link: &str) -> Option<TweetRef> {
    let caps = TWEET_LINK_RE.captures(link)?;
    Some(TweetRef {
        screen_name: caps[1].to_string(),
        tweet_id: caps[2].to_string(),
    })
}

/// Replies have to contain the original tweeter's screen name, or the API
/// will not thread them. Prepends it when absent.
pub fn prep_reply_text(screen_name: &str, text: &str) -> String {
    if text.contains(screen_name) {
        text.to_string()
    } else if screen_name.contains('@') {
        format!("{screen_name} {text}")
    } else {
        format!("@{screen_name} {text}")
    }
}

/// Replace `@@name` with `@name` in outgoing tweet text.
pub fn escape_double_mentions(text: &str) -> String {
    DOUBLE_MENTION_RE.replace_all(text, "$1@$2").into_owned()
}

/// Whether the text still carries an unresolved chat mention token.
/// Such text must be rejected before any network call.
pub fn has_unresolved_mention(text: &str) -> bool {
    RAW_MENTION_RE.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_representative_link() {
        let parsed =
            parse_tweet_link("https://twitter.com/haacked/status/842543742523334656").unwrap();
        assert_eq!(parsed.screen_name, "haacked");
        assert_eq!(parsed.tweet_id, "842543742523334656");
    }

    #[test]
    fn parses_statuses_variant_and_mixed_case() {
        let parsed =
            parse_tweet_link("https://TWITTER.com/shanselman/statuses/1234567890").unwrap();
        assert_eq!(parsed.screen_name, "shanselman");
        assert_eq!(parsed.tweet_id, "1234567890");
    }

    #[test]
    fn strips_query_from_tweet_id() {
        let parsed = parse_tweet_link("https://twitter.com/haacked/status/842?s=20").unwrap();
        assert_eq!(parsed.tweet_id, "842");
    }

    #[test]
    fn rejects_non_status_links() {
        assert_eq!(parse_tweet_link("https://twitter.com/haacked"), None);
        assert_eq!(parse_tweet_link("not a link at all"), None);
        assert_eq!(parse_tweet_link(""), None);
    }

    #[test]
    fn reply_text_gets_handle_prepended() {
        assert_eq!(
            prep_reply_text("haacked", "nice post"),
            "@haacked nice post"
        );
    }

    #[test]
    fn reply_text_with_handle_is_unchanged() {
        assert_eq!(
            prep_reply_text("haacked", "I agree with @haacked here"),
            "I agree with @haacked here"
        );
    }

    #[test]
    fn reply_text_handles_pre_sigiled_name() {
        assert_eq!(prep_reply_text("@haacked", "hi"), "@haacked hi");
    }

    #[test]
    fn double_mentions_collapse() {
        assert_eq!(escape_double_mentions("@@haacked hello"), "@haacked hello");
        assert_eq!(
            escape_double_mentions("cc @@haacked and @@shanselman"),
            "cc @haacked and @shanselman"
        );
    }

    #[test]
    fn double_mention_mid_word_is_left_alone() {
        assert_eq!(escape_double_mentions("mail@@host"), "mail@@host");
    }

    #[test]
    fn unresolved_mentions_detected() {
        assert!(has_unresolved_mention("hey <@U12345> look"));
        assert!(!has_unresolved_mention("hey @haacked look"));
    }
}
