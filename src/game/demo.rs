//! Self-playing scoreboard loop
//!
//! Runs a whole competition with a `Moderator` making every decision:
//! a batch of rubric questions, the advance to finals, a batch of finals
//! questions, then the finish. Used by `trivia demo` and by tests that
//! want a realistic finished game.

use crate::core::TeamId;
use crate::game::cue::CueSink;
use crate::game::engine::Scoreboard;
use crate::game::logger::VerbosityLevel;
use crate::game::moderator::{legal_awards, Moderator, ModeratorAction};
use crate::game::Round;
use crate::Result;
use serde::Serialize;

/// Why a demo stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DemoEndReason {
    /// The game reached `finished`
    Finished,
    /// The moderator declined to continue
    ModeratorStopped,
}

/// Outcome of a demo run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemoResult {
    pub winner: Option<TeamId>,
    pub winning_score: u32,
    pub rubric_awards: usize,
    pub final_awards: usize,
    pub total_points: u64,
    /// Actions the engine refused
    pub rejected: usize,
    pub end_reason: DemoEndReason,
}

/// Apply one moderator decision to the engine
pub fn apply_action<C: CueSink>(
    engine: &mut Scoreboard<C>,
    action: ModeratorAction,
) -> Result<()> {
    match action {
        ModeratorAction::Award { team_id, points } => {
            engine.award_points(team_id, points).map(|_| ())
        }
        ModeratorAction::SelectPoints { points } => engine.set_selected_points(points),
        ModeratorAction::AdvanceToFinals => engine.advance_to_finals(),
        ModeratorAction::FinishGame => engine.finish_game().map(|_| ()),
    }
}

/// Drives a scoreboard to completion with a moderator
pub struct DemoLoop<'a, C: CueSink> {
    engine: &'a mut Scoreboard<C>,
    questions_per_round: usize,
    rejected: usize,
}

impl<'a, C: CueSink> DemoLoop<'a, C> {
    pub fn new(engine: &'a mut Scoreboard<C>, questions_per_round: usize) -> Self {
        DemoLoop {
            engine,
            questions_per_round,
            rejected: 0,
        }
    }

    /// Offer `available` to the moderator and apply its pick
    ///
    /// Returns `false` when the moderator stops.
    fn step(&mut self, moderator: &mut dyn Moderator, available: &[ModeratorAction]) -> bool {
        let Some(action) = moderator.choose_action(self.engine.state(), available) else {
            return false;
        };
        if let Err(err) = apply_action(&mut *self.engine, action) {
            self.rejected += 1;
            self.engine.logger().event(
                VerbosityLevel::Verbose,
                "demo",
                &format!("Moderator action refused: {err}"),
            );
        }
        true
    }

    fn play_questions(&mut self, moderator: &mut dyn Moderator) -> bool {
        for _ in 0..self.questions_per_round {
            let available = legal_awards(self.engine.state());
            if !self.step(moderator, &available) {
                return false;
            }
        }
        true
    }

    /// Play the whole game
    pub fn run(mut self, moderator: &mut dyn Moderator) -> DemoResult {
        let completed = self.run_rounds(moderator);
        if completed {
            moderator.on_game_end(self.engine.state());
        }
        self.result(if completed {
            DemoEndReason::Finished
        } else {
            DemoEndReason::ModeratorStopped
        })
    }

    fn run_rounds(&mut self, moderator: &mut dyn Moderator) -> bool {
        if self.engine.state().current_round == Round::Rubric {
            if !self.play_questions(moderator) {
                return false;
            }
            if self.engine.state().can_advance_to_finals()
                && !self.step(moderator, &[ModeratorAction::AdvanceToFinals])
            {
                return false;
            }
        }

        if self.engine.state().current_round == Round::Final && !self.play_questions(moderator) {
            return false;
        }

        while !self.engine.state().current_round.is_finished() {
            if !self.step(moderator, &[ModeratorAction::FinishGame]) {
                return false;
            }
        }
        true
    }

    fn result(&self, end_reason: DemoEndReason) -> DemoResult {
        let state = self.engine.state();
        let stats = state.stats();
        let leader = state.top_teams(1).into_iter().next();

        DemoResult {
            winner: state.winner().map(|t| t.id),
            winning_score: leader.map_or(0, |t| t.score),
            rubric_awards: stats.rubric_questions,
            final_awards: stats.final_questions,
            total_points: stats.total_points,
            rejected: self.rejected,
            end_reason,
        }
    }
}

/// Convenience wrapper: run a full demo game
pub fn run_demo<C: CueSink>(
    engine: &mut Scoreboard<C>,
    moderator: &mut dyn Moderator,
    questions_per_round: usize,
) -> DemoResult {
    DemoLoop::new(engine, questions_per_round).run(moderator)
}
