//! Core scoreboard types and entities

pub mod entity;
pub mod points;
pub mod team;
pub mod types;

pub use entity::{AwardId, TeamId};
pub use points::{is_standard, DEFAULT_POINTS, POINT_OPTIONS};
pub use team::{seed_roster, Team, SEED_TEAM_COUNT};
pub use types::{ColorToken, TeamName};
