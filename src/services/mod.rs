//! Service layer orchestrating state, persistence, and capabilities.

/// Core scorekeeping logic and reconciliation with the saved-games log.
pub mod score_service;
