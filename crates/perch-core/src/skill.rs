use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::context::SkillContext;
use crate::error::Result;

/// A single command-triggered unit of bot behavior.
///
/// Skills receive one context per invocation, send replies through it, and
/// return `Err` only when the invocation itself fails (which the host
/// surfaces as an opaque failure).
#[async_trait]
pub trait Skill: Send + Sync {
    /// The command name users type, e.g. "tweet" for `@perch tweet ...`.
    fn name(&self) -> &str;

    /// One-line description shown in skill listings.
    fn description(&self) -> &str;

    /// Usage lines for help output.
    fn usage(&self) -> &str {
        ""
    }

    async fn execute(&self, ctx: &SkillContext) -> Result<()>;
}

/// The skill registry — maps command names to skill implementations.
#[derive(Default)]
pub struct SkillRegistry {
    skills: HashMap<String, Arc<dyn Skill>>,
}

impl SkillRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a skill under its own name. Last registration wins.
    pub fn register(&mut self, skill: Arc<dyn Skill>) {
        self.skills.insert(skill.name().to_string(), skill);
    }

    /// Get a skill by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Skill>> {
        self.skills.get(name).cloned()
    }

    /// All registered skills, sorted by name.
    pub fn list(&self) -> Vec<Arc<dyn Skill>> {
        let mut skills: Vec<_> = self.skills.values().cloned().collect();
        skills.sort_by(|a, b| a.name().cmp(b.name()));
        skills
    }

    pub fn count(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// A name + description block for help output and console listings.
    pub fn help_block(&self) -> String {
        let mut lines = Vec::with_capacity(self.skills.len());
        for skill in self.list() {
            lines.push(format!("{} — {}", skill.name(), skill.description()));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dummy(&'static str);

    #[async_trait]
    impl Skill for Dummy {
        fn name(&self) -> &str {
            self.0
        }
        fn description(&self) -> &str {
            "a dummy skill"
        }
        async fn execute(&self, _ctx: &SkillContext) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn register_and_get() {
        let mut reg = SkillRegistry::new();
        reg.register(Arc::new(Dummy("hello")));
        reg.register(Arc::new(Dummy("tweet")));

        assert_eq!(reg.count(), 2);
        assert!(reg.get("hello").is_some());
        assert!(reg.get("nonexistent").is_none());
        assert!(!reg.is_empty());
    }

    #[test]
    fn list_is_sorted() {
        let mut reg = SkillRegistry::new();
        reg.register(Arc::new(Dummy("tweet")));
        reg.register(Arc::new(Dummy("404-finder")));
        reg.register(Arc::new(Dummy("hello")));

        let names: Vec<_> = reg.list().iter().map(|s| s.name().to_string()).collect();
        assert_eq!(names, vec!["404-finder", "hello", "tweet"]);
    }

    #[test]
    fn help_block_lists_all() {
        let mut reg = SkillRegistry::new();
        reg.register(Arc::new(Dummy("room")));
        reg.register(Arc::new(Dummy("sql")));

        let block = reg.help_block();
        assert!(block.contains("room — a dummy skill"));
        assert!(block.contains("sql — a dummy skill"));
    }

    #[test]
    fn last_registration_wins() {
        let mut reg = SkillRegistry::new();
        reg.register(Arc::new(Dummy("hello")));
        reg.register(Arc::new(Dummy("hello")));
        assert_eq!(reg.count(), 1);
    }
}
