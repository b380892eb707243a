//! # perch-cli
//!
//! Console harness for the Perch skill runtime.
//!
//! ## Commands
//!
//! - `perch run <skill> [args...]` — Invoke a skill; replies print to stdout
//! - `perch skills` — List registered skills
//! - `perch config` — Show the resolved configuration
//! - `perch brain <scope>` — Show brain entries stored under a scope

pub mod commands;
pub mod console;

pub use commands::Cli;
