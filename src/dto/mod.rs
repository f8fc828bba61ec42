//! Read models handed to the rendering layer.

pub mod scoreboard;
