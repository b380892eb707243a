//! # perch-skills
//!
//! The builtin Perch skills. Each skill is a small command-dispatch unit:
//! it splits the raw argument string on whitespace, selects a handler from
//! the first token, and sends replies through the [`perch_core::SkillContext`]
//! it was invoked with.
//!
//! Dispatch policy is deliberately per-skill, not unified: `tweet`
//! upper-cases its command token, `room` compares lower-case tokens,
//! `hello` and `sql` match the whole raw string. Unknown input falls back
//! to a default handler where that is the skill's contract (`tweet` treats
//! unrecognized text as the tweet itself) and to a usage reply everywhere
//! else.

pub mod builtin;
pub mod link_check;
pub mod room_admin;
pub mod sql_runner;
pub mod tutorial;
pub mod twitter;

pub use builtin::builtin_registry;
pub use link_check::LinkCheckSkill;
pub use room_admin::RoomSkill;
pub use sql_runner::SqlSkill;
pub use tutorial::TutorialSkill;
pub use twitter::{TweetProxySkill, TweetSkill};
