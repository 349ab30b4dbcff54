//! Competition rounds

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro-phase of the competition
///
/// Rounds only move forward (`Rubric` → `Final` → `Finished`).
/// The single way back is a full reset, which is not a round transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Round {
    /// Qualifying round, every team may score
    #[default]
    Rubric,
    /// Finals, only the qualifiers may score
    Final,
    /// Game over, no more scoring
    Finished,
}

impl Round {
    /// Can points be awarded in this round?
    pub fn accepts_scoring(&self) -> bool {
        matches!(self, Round::Rubric | Round::Final)
    }

    /// Is this the terminal round?
    pub fn is_finished(&self) -> bool {
        matches!(self, Round::Finished)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Round::Rubric => "rubric",
            Round::Final => "final",
            Round::Finished => "finished",
        }
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
