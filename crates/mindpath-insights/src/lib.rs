//! Deterministic analysis over decrypted entries.
//!
//! Everything in this crate is pure and request-scoped: scoring a single
//! submission for crisis risk, aggregating mood history into trends and
//! recommendations, aggregating journal text into themes, and matching the
//! most recent mood against the coping-strategy pool table. Persistence and
//! decryption happen in the caller.

pub mod crisis;
pub mod journal;
pub mod mood;
pub mod strategies;
