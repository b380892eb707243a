use serde::{Deserialize, Serialize};

/// A chat room the bot can address or administer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRef {
    /// Platform identifier (channel ID on Slack-like hosts).
    pub id: String,
    /// Human-readable name, without the leading `#`.
    pub name: String,
}

impl RoomRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Stable key for room-scoped brain entries.
    pub fn cache_key(&self) -> &str {
        &self.id
    }
}

impl std::fmt::Display for RoomRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.name)
    }
}

/// A chat user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: String,
    /// Display name, without the leading `@`.
    pub name: String,
}

impl UserRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for UserRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.name)
    }
}

/// One token of a skill invocation, classified by the host tokenizer.
///
/// A closed variant set so handlers dispatch on argument kind with
/// exhaustive matching instead of duck-typing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Argument {
    /// Plain text token.
    Text(String),
    /// A `#room` reference.
    Room(RoomRef),
    /// An `@user` mention.
    Mention(UserRef),
}

impl Argument {
    /// The token's surface text, as the user typed it.
    pub fn value(&self) -> String {
        match self {
            Argument::Text(t) => t.clone(),
            Argument::Room(r) => format!("#{}", r.name),
            Argument::Mention(u) => format!("@{}", u.name),
        }
    }

    pub fn as_room(&self) -> Option<&RoomRef> {
        match self {
            Argument::Room(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_mention(&self) -> Option<&UserRef> {
        match self {
            Argument::Mention(u) => Some(u),
            _ => None,
        }
    }
}

/// The tokenized argument sequence handed to a skill.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Arguments(Vec<Argument>);

impl Arguments {
    pub fn new(tokens: Vec<Argument>) -> Self {
        Self(tokens)
    }

    /// Console-grade tokenizer: `#x` becomes a room reference, `@x` a
    /// mention, everything else plain text. A real chat host supplies
    /// richer references; this matches its observable shape.
    pub fn tokenize(raw: &str) -> Self {
        let tokens = raw
            .split_whitespace()
            .map(|tok| {
                if let Some(name) = tok.strip_prefix('#').filter(|n| !n.is_empty()) {
                    Argument::Room(RoomRef::new(name, name))
                } else if let Some(name) = tok.strip_prefix('@').filter(|n| !n.is_empty()) {
                    Argument::Mention(UserRef::new(name, name))
                } else {
                    Argument::Text(tok.to_string())
                }
            })
            .collect();
        Self(tokens)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Argument> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Argument> {
        self.0.iter()
    }

    /// The arguments from `index` onward.
    pub fn rest(&self, index: usize) -> Arguments {
        Arguments(self.0.get(index..).unwrap_or_default().to_vec())
    }

    /// The joined surface text of all tokens.
    pub fn value(&self) -> String {
        self.0
            .iter()
            .map(Argument::value)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// All mentioned users, in order.
    pub fn mentions(&self) -> Vec<&UserRef> {
        self.0.iter().filter_map(Argument::as_mention).collect()
    }
}

impl<'a> IntoIterator for &'a Arguments {
    type Item = &'a Argument;
    type IntoIter = std::slice::Iter<'a, Argument>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_classifies_kinds() {
        let args = Arguments::tokenize("topic #general a new topic for @alice");
        assert_eq!(args.len(), 7);
        assert_eq!(args.get(0), Some(&Argument::Text("topic".into())));
        assert_eq!(
            args.get(1).and_then(Argument::as_room).map(|r| r.name.as_str()),
            Some("general")
        );
        assert_eq!(
            args.get(6).and_then(Argument::as_mention).map(|u| u.name.as_str()),
            Some("alice")
        );
    }

    #[test]
    fn bare_sigils_stay_text() {
        let args = Arguments::tokenize("# @");
        assert_eq!(args.get(0), Some(&Argument::Text("#".into())));
        assert_eq!(args.get(1), Some(&Argument::Text("@".into())));
    }

    #[test]
    fn value_reconstructs_surface_text() {
        let args = Arguments::tokenize("invite #ops @bob @eve");
        assert_eq!(args.value(), "invite #ops @bob @eve");
        assert_eq!(args.rest(1).value(), "#ops @bob @eve");
    }

    #[test]
    fn rest_past_end_is_empty() {
        let args = Arguments::tokenize("one two");
        assert!(args.rest(5).is_empty());
    }

    #[test]
    fn mentions_filter() {
        let args = Arguments::tokenize("invite #ops @bob hello @eve");
        let mentioned: Vec<_> = args.mentions().iter().map(|u| u.name.clone()).collect();
        assert_eq!(mentioned, vec!["bob", "eve"]);
    }
}
