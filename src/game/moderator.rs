//! Moderators: whoever decides what happens next
//!
//! A human moderator drives the console. For demos and tests the same
//! decisions come from a `Moderator` implementation, which is offered the
//! currently legal actions and picks one.

use crate::core::{TeamId, POINT_OPTIONS};
use crate::game::GameState;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};

/// One moderator decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ModeratorAction {
    /// Award `points` to a team
    Award { team_id: TeamId, points: u32 },
    /// Change the selected point value
    SelectPoints { points: u32 },
    /// Move the top teams into the finals
    AdvanceToFinals,
    /// End the game
    FinishGame,
}

/// Every award a moderator could legally make right now
///
/// One entry per (eligible team, standard point value) pair.
pub fn legal_awards(state: &GameState) -> Vec<ModeratorAction> {
    state
        .teams
        .iter()
        .filter(|t| state.can_score(t.id))
        .flat_map(|t| {
            POINT_OPTIONS.iter().map(move |&points| ModeratorAction::Award {
                team_id: t.id,
                points,
            })
        })
        .collect()
}

/// Decision-maker driving a scoreboard
pub trait Moderator {
    /// Pick one of `available` (or `None` to stop the game here)
    fn choose_action(
        &mut self,
        state: &GameState,
        available: &[ModeratorAction],
    ) -> Option<ModeratorAction>;

    /// Called once after the game finishes
    fn on_game_end(&mut self, _state: &GameState) {}
}

/// A moderator that makes random choices
///
/// Seeded for reproducible demos: the same seed always yields the same game.
pub struct RandomModerator {
    rng: ChaCha12Rng,
}

impl RandomModerator {
    /// Create a random moderator seeded from OS entropy
    pub fn new() -> Self {
        RandomModerator {
            rng: ChaCha12Rng::from_entropy(),
        }
    }

    /// Create a random moderator with a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        RandomModerator {
            rng: ChaCha12Rng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomModerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Moderator for RandomModerator {
    fn choose_action(
        &mut self,
        _state: &GameState,
        available: &[ModeratorAction],
    ) -> Option<ModeratorAction> {
        if available.is_empty() {
            None
        } else {
            let index = self.rng.gen_range(0..available.len());
            Some(available[index])
        }
    }
}

/// A moderator that follows a predetermined script
///
/// Ignores what is available; illegal scripted actions are simply rejected
/// by the engine. Stops when the script runs out.
pub struct ScriptedModerator {
    actions: Vec<ModeratorAction>,
    current_step: usize,
}

impl ScriptedModerator {
    pub fn new(actions: Vec<ModeratorAction>) -> Self {
        ScriptedModerator {
            actions,
            current_step: 0,
        }
    }

    /// Scripted actions not yet handed out
    pub fn remaining(&self) -> usize {
        self.actions.len() - self.current_step
    }
}

impl Moderator for ScriptedModerator {
    fn choose_action(
        &mut self,
        _state: &GameState,
        _available: &[ModeratorAction],
    ) -> Option<ModeratorAction> {
        let action = self.actions.get(self.current_step).copied()?;
        self.current_step += 1;
        Some(action)
    }
}
