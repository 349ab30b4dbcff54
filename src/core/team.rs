//! Team representation and the fixed seed roster

use crate::core::{ColorToken, TeamId, TeamName};
use serde::{Deserialize, Serialize};

/// A team competing on the scoreboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Stable identity assigned at roster creation
    pub id: TeamId,

    /// Display name
    pub name: TeamName,

    /// Display emoji
    pub emoji: String,

    /// Accumulated points
    pub score: u32,

    /// 1-based standing by descending score
    pub rank: u32,

    /// Display color token (opaque to the engine)
    pub color: ColorToken,
}

impl Team {
    pub fn new(
        id: TeamId,
        name: impl Into<TeamName>,
        emoji: impl Into<String>,
        color: impl Into<ColorToken>,
    ) -> Self {
        Team {
            id,
            name: name.into(),
            emoji: emoji.into(),
            score: 0,
            rank: 1,
            color: color.into(),
        }
    }

    /// Add `points` and return the new score
    ///
    /// On overflow the score is left as it was and `None` comes back.
    pub fn add_points(&mut self, points: u32) -> Option<u32> {
        self.score = self.score.checked_add(points)?;
        Some(self.score)
    }

    pub fn has_scored(&self) -> bool {
        self.score > 0
    }
}

/// (name, emoji, color) of each seed team, in roster order
const SEED_ROSTER: [(&str, &str, &str); 7] = [
    ("Lightning Bolts", "⚡", "from-yellow-400 to-orange-500"),
    ("Brain Busters", "🧠", "from-purple-400 to-pink-500"),
    ("Quiz Masters", "🎯", "from-blue-400 to-cyan-500"),
    ("Trivia Titans", "🏆", "from-green-400 to-emerald-500"),
    ("Smart Cookies", "🍪", "from-amber-400 to-yellow-500"),
    ("Knowledge Knights", "⚔️", "from-indigo-400 to-purple-500"),
    ("Fact Finders", "🔍", "from-red-400 to-pink-500"),
];

/// Number of teams on the seed roster
pub const SEED_TEAM_COUNT: usize = SEED_ROSTER.len();

/// Build the seed roster: seven teams at zero score, ids "1" through "7"
///
/// Ranks start as 1..7 in roster order, which is what a stable
/// descending sort over all-zero scores produces.
pub fn seed_roster() -> Vec<Team> {
    SEED_ROSTER
        .iter()
        .enumerate()
        .map(|(idx, (name, emoji, color))| {
            let mut team = Team::new(TeamId::new(idx as u32 + 1), *name, *emoji, *color);
            team.rank = idx as u32 + 1;
            team
        })
        .collect()
}
