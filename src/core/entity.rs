//! Stable integer identities for scoreboard entities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identity of a team on the roster
///
/// Assigned once when the roster is created and never reassigned.
/// Displayed and parsed as a bare number ("1", "2", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(u32);

impl TeamId {
    pub const fn new(id: u32) -> Self {
        TeamId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TeamId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().parse::<u32>().map(TeamId)
    }
}

/// Sequential identity of an award record
///
/// Starts at 1 for the first award of a game and restarts after a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AwardId(u32);

impl AwardId {
    pub fn new(id: u32) -> Self {
        AwardId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for AwardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
