//! # perch-core
//!
//! Core types, traits, and primitives for the Perch skill runtime.
//! This crate defines the shared vocabulary used by every other crate in the
//! workspace: the error type, the argument model, the host capability traits
//! (reply sink, brain, secrets, rooms), the skill context, and the skill
//! registry.

pub mod args;
pub mod capabilities;
pub mod context;
pub mod error;
pub mod mock;
pub mod skill;

pub use args::{Argument, Arguments, RoomRef, UserRef};
pub use capabilities::{Brain, ReplySink, RoomOps, SecretStore};
pub use context::{ServiceEndpoints, SkillContext};
pub use error::{PerchError, Result};
pub use skill::{Skill, SkillRegistry};
