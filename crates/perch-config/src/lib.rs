//! # perch-config
//!
//! Configuration for the Perch console harness. Reads from `perch.toml`,
//! environment variables, and CLI overrides — in that precedence order.

pub mod loader;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::PerchConfig;
