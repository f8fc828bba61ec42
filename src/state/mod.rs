//! Runtime state: the sheet being scored and the saved-games log.

pub mod game;
pub mod history;
