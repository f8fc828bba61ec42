//! Library crate for rink-tally, exposing modules for the binary and integration tests.
//!
//! The core tracks goals and shots for two teams, derives goalie save
//! percentages, and reconciles the live sheet with an append-only log of
//! saved games, persisting everything through a pluggable key-value store.

pub mod clock;
pub mod config;
pub mod dao;
pub mod dto;
pub mod services;
pub mod state;
