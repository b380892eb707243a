use std::sync::Arc;

use perch_core::SkillRegistry;

use crate::link_check::LinkCheckSkill;
use crate::room_admin::RoomSkill;
use crate::sql_runner::SqlSkill;
use crate::tutorial::TutorialSkill;
use crate::twitter::{TweetProxySkill, TweetSkill};

/// A registry holding every builtin skill.
pub fn builtin_registry() -> SkillRegistry {
    let mut registry = SkillRegistry::new();
    registry.register(Arc::new(LinkCheckSkill));
    registry.register(Arc::new(TutorialSkill));
    registry.register(Arc::new(TweetSkill));
    registry.register(Arc::new(TweetProxySkill));
    registry.register(Arc::new(SqlSkill));
    registry.register(Arc::new(RoomSkill));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_builtins_registered() {
        let registry = builtin_registry();
        for name in ["404-finder", "hello", "tweet", "tweet-proxy", "sql", "room"] {
            assert!(registry.get(name).is_some(), "{name} missing");
        }
        assert_eq!(registry.count(), 6);
    }

    #[test]
    fn builtin_descriptions_are_nonempty() {
        for skill in builtin_registry().list() {
            assert!(!skill.description().is_empty(), "{}", skill.name());
            assert!(!skill.usage().is_empty(), "{}", skill.name());
        }
    }
}
