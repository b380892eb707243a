//! # perch-brain
//!
//! The persistent key-value "brain" behind Perch skills: one SQLite table of
//! `(scope, key) → value` rows, where the scope is a user or room identity.
//! Skills see a [`perch_core::Brain`] handle already bound to one scope.
//!
//! Semantics are deliberately minimal: last write wins, no transactions, no
//! cross-invocation locking. Concurrent invocations from the same user can
//! race on a key; the stored flows (tutorial cursor, room auth secret) are
//! single-user-driven and tolerate it.

pub mod store;

pub use store::{BrainStore, ScopedBrain};
