//! Persistence layer: storage boundary, persisted models, and migrations.

/// Key-value storage boundary and built-in backends.
pub mod kv;
/// One-shot schema migrations for legacy persisted data.
pub mod migrations;
/// Persisted model definitions.
pub mod models;
/// Typed repository for the current game and the saved-games log.
pub mod score_store;
/// Storage error types.
pub mod storage;
