//! Error types for the trivia scoreboard

use crate::core::TeamId;
use crate::game::Round;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TriviaError {
    #[error("Team not found: {0}")]
    TeamNotFound(TeamId),

    #[error("Invalid point value: {0}")]
    InvalidPoints(u32),

    #[error("Operation not allowed in the {0} round")]
    WrongRound(Round),

    #[error("Cannot advance to finals before any team has scored")]
    NoScoresYet,

    #[error("Awarding {points} points would overflow the score of team {team}")]
    ScoreOverflow { team: TeamId, points: u32 },

    #[error("Duplicate team id in roster: {0}")]
    DuplicateTeam(TeamId),

    #[error("Invalid timer duration: {0}s")]
    InvalidDuration(u32),

    #[error("Parse error: {0}")]
    ParseError(String),
}

pub type Result<T> = std::result::Result<T, TriviaError>;
