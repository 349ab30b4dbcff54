//! Trivia Scoreboard - game-state engine for live trivia competitions
//!
//! Tracks teams, awards points per question, advances the top scorers into
//! a finals round and announces a winner. The `trivia` binary wraps the
//! engine in a terminal console.

pub mod console;
pub mod core;
pub mod error;
pub mod game;
pub mod history;
pub mod session;

pub use error::{Result, TriviaError};
