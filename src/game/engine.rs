//! The scoreboard engine
//!
//! `Scoreboard` owns the `GameState` and is the only thing that mutates it.
//! Each operation either applies completely or returns an error and leaves
//! the state exactly as it was.
//!
//! The engine never sleeps or spawns. Time-based effects (the countdown
//! tick and the celebration clear) are handed out as `TaskToken`s; whoever
//! drives the engine schedules them and calls back `tick` or
//! `clear_celebration` with the token. Tokens that have since been
//! superseded are ignored.

use crate::core::{AwardId, Team, TeamId};
use crate::game::cue::{Cue, CueSink, SilentCues};
use crate::game::logger::{ScoreLogger, VerbosityLevel};
use crate::game::ranking;
use crate::game::state::{GameState, Theme, FINALIST_COUNT};
use crate::game::timer::{TaskToken, TickOutcome, DEFAULT_TIMER_SECS};
use crate::game::Round;
use crate::{Result, TriviaError};
use std::time::Duration;

/// Formatted event logging
///
/// Without the `verbose-logging` feature the message is never formatted.
macro_rules! log_event {
    ($self:expr, $level:expr, $category:expr, $($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        {
            $self.logger.event($level, $category, &format!($($arg)*));
        }
        #[cfg(not(feature = "verbose-logging"))]
        {
            let _ = &$self;
            let _ = || format!($($arg)*);
        }
    };
}

/// Delay before the celebration overlay clears itself
pub const CELEBRATION_DELAY: Duration = Duration::from_secs(5);

/// Tunable engine settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreboardConfig {
    /// Countdown length used by reset and by `start_default_timer`
    pub timer_secs: u32,
    /// How long the celebration overlay stays up
    pub celebration_delay: Duration,
    /// How many teams qualify for the finals
    pub finalist_count: usize,
}

impl Default for ScoreboardConfig {
    fn default() -> Self {
        ScoreboardConfig {
            timer_secs: DEFAULT_TIMER_SECS,
            celebration_delay: CELEBRATION_DELAY,
            finalist_count: FINALIST_COUNT,
        }
    }
}

/// Game state engine
pub struct Scoreboard<C: CueSink = SilentCues> {
    state: GameState,
    config: ScoreboardConfig,
    cues: C,
    logger: ScoreLogger,
    celebration_generation: u64,
    pending_celebration: Option<TaskToken>,
}

impl Scoreboard<SilentCues> {
    /// Engine with default settings and no cue output
    pub fn new() -> Self {
        Self::with_cues(SilentCues)
    }
}

impl Default for Scoreboard<SilentCues> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: CueSink> Scoreboard<C> {
    pub fn with_cues(cues: C) -> Self {
        Self::with_config(ScoreboardConfig::default(), cues)
    }

    pub fn with_config(config: ScoreboardConfig, cues: C) -> Self {
        Scoreboard {
            state: GameState::with_timer(config.timer_secs),
            config,
            cues,
            logger: ScoreLogger::new(),
            celebration_generation: 0,
            pending_celebration: None,
        }
    }

    /// Read-only view of the current state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &ScoreboardConfig {
        &self.config
    }

    pub fn cues(&self) -> &C {
        &self.cues
    }

    pub fn cues_mut(&mut self) -> &mut C {
        &mut self.cues
    }

    pub fn logger(&self) -> &ScoreLogger {
        &self.logger
    }

    pub fn logger_mut(&mut self) -> &mut ScoreLogger {
        &mut self.logger
    }

    /// Report a rejected operation and hand the error back
    fn reject(&self, err: TriviaError) -> TriviaError {
        log_event!(self, VerbosityLevel::Verbose, "rejected", "Rejected: {err}");
        err
    }

    /// Award `points` to `team_id`
    ///
    /// Exactly one score changes, every rank is recomputed, and one award
    /// record is appended. Rejected for an unknown team, zero points, an
    /// award that would overflow the team's score, or once the game is
    /// finished.
    pub fn award_points(&mut self, team_id: TeamId, points: u32) -> Result<AwardId> {
        let round = self.state.current_round;
        if !round.accepts_scoring() {
            return Err(self.reject(TriviaError::WrongRound(round)));
        }
        if points == 0 {
            return Err(self.reject(TriviaError::InvalidPoints(points)));
        }

        if !self.state.contains_team(team_id) {
            return Err(self.reject(TriviaError::TeamNotFound(team_id)));
        }

        let Some(score) = self.state.team_mut(team_id)?.add_points(points) else {
            return Err(self.reject(TriviaError::ScoreOverflow {
                team: team_id,
                points,
            }));
        };

        ranking::assign_ranks(&mut self.state.teams);
        let award_id = self.state.awards.record(round, team_id, points).id;

        log_event!(
            self,
            VerbosityLevel::Normal,
            "award",
            "{} +{points} ({score} total)",
            self.team_name(team_id)
        );
        self.cues.play(Cue::Success);

        Ok(award_id)
    }

    /// Award the currently selected point value
    pub fn award_selected(&mut self, team_id: TeamId) -> Result<AwardId> {
        self.award_points(team_id, self.state.selected_points)
    }

    /// Move from the rubric round into the finals
    ///
    /// The roster stays whole. The top teams at this instant become the
    /// finalist snapshot and their ranks drop to the co-equal baseline of 1.
    pub fn advance_to_finals(&mut self) -> Result<()> {
        let round = self.state.current_round;
        if round != Round::Rubric {
            return Err(self.reject(TriviaError::WrongRound(round)));
        }
        if !self.state.any_scored() {
            return Err(self.reject(TriviaError::NoScoresYet));
        }

        let finalists = ranking::top_team_ids(&self.state.teams, self.config.finalist_count);
        for &id in &finalists {
            if let Ok(team) = self.state.team_mut(id) {
                team.rank = 1;
            }
        }
        self.state.finalists = finalists.into_iter().collect();
        self.state.current_round = Round::Final;

        let names = self.team_names(self.state.finalists());
        self.logger.event(
            VerbosityLevel::Minimal,
            "round",
            &format!("Advancing to finals: {}", names.join(", ")),
        );
        Ok(())
    }

    /// End the game and raise the celebration overlay
    ///
    /// Returns the token for the celebration clear, which the driver should
    /// deliver to `clear_celebration` after `config().celebration_delay`.
    pub fn finish_game(&mut self) -> Result<TaskToken> {
        let round = self.state.current_round;
        if round.is_finished() {
            return Err(self.reject(TriviaError::WrongRound(round)));
        }

        self.state.current_round = Round::Finished;
        self.state.show_confetti = true;
        self.celebration_generation += 1;
        let token = TaskToken::new(self.celebration_generation);
        self.pending_celebration = Some(token);

        let message = match self.state.winner() {
            Some(winner) => format!(
                "Game over! {} {} wins with {} points",
                winner.emoji, winner.name, winner.score
            ),
            None => "Game over!".to_string(),
        };
        self.logger.event(VerbosityLevel::Minimal, "round", &message);
        self.cues.play(Cue::Victory);

        Ok(token)
    }

    /// Deferred half of `finish_game`
    ///
    /// Clears the overlay if `token` is still the pending one. Returns
    /// whether anything changed.
    pub fn clear_celebration(&mut self, token: TaskToken) -> bool {
        if self.pending_celebration != Some(token) {
            return false;
        }
        self.pending_celebration = None;
        self.state.show_confetti = false;
        log_event!(self, VerbosityLevel::Verbose, "round", "Celebration cleared");
        true
    }

    /// Token of the celebration clear still waiting to run
    pub fn pending_celebration(&self) -> Option<TaskToken> {
        self.pending_celebration
    }

    /// Back to the seed roster, from any round
    ///
    /// The theme and the selected point value survive. Outstanding tick and
    /// celebration tokens are invalidated.
    pub fn reset_game(&mut self) {
        let theme = self.state.theme;
        let selected_points = self.state.selected_points;
        let mut timer = self.state.timer.clone();
        timer.reset(self.config.timer_secs);

        self.state = GameState::with_timer(self.config.timer_secs);
        self.state.theme = theme;
        self.state.selected_points = selected_points;
        self.state.timer = timer;

        self.celebration_generation += 1;
        self.pending_celebration = None;

        self.logger.event(VerbosityLevel::Minimal, "round", "Game reset");
    }

    /// Choose the value used by the next `award_selected`
    pub fn set_selected_points(&mut self, points: u32) -> Result<()> {
        if points == 0 {
            return Err(self.reject(TriviaError::InvalidPoints(points)));
        }
        self.state.selected_points = points;
        log_event!(self, VerbosityLevel::Verbose, "points", "Selected {points} points");
        Ok(())
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.state.theme = self.state.theme.toggled();
        log_event!(self, VerbosityLevel::Verbose, "theme", "Theme: {:?}", self.state.theme);
        self.state.theme
    }

    /// Start or restart the countdown from `duration_secs`
    ///
    /// Returns the token the ticker must present with every `tick`. Any
    /// earlier ticker's token stops working.
    pub fn start_timer(&mut self, duration_secs: u32) -> Result<TaskToken> {
        if duration_secs == 0 {
            return Err(self.reject(TriviaError::InvalidDuration(duration_secs)));
        }
        let token = self.state.timer.start(duration_secs);
        log_event!(self, VerbosityLevel::Normal, "timer", "Timer started: {}", self.state.timer);
        Ok(token)
    }

    /// Start the countdown from the configured default
    pub fn start_default_timer(&mut self) -> TaskToken {
        let token = self.state.timer.start(self.config.timer_secs);
        log_event!(self, VerbosityLevel::Normal, "timer", "Timer started: {}", self.state.timer);
        token
    }

    pub fn stop_timer(&mut self) {
        if self.state.timer.is_running() {
            self.state.timer.stop();
            log_event!(self, VerbosityLevel::Normal, "timer", "Timer stopped at {}", self.state.timer);
        }
    }

    /// Deferred half of `start_timer`: one elapsed second
    pub fn tick(&mut self, token: TaskToken) -> TickOutcome {
        let outcome = self.state.timer.tick(token);
        if outcome == TickOutcome::Expired {
            self.logger.event(VerbosityLevel::Normal, "timer", "Time's up!");
            self.cues.play(Cue::TimeUp);
        }
        outcome
    }

    /// The `count` highest scorers, best first
    pub fn top_teams(&self, count: usize) -> Vec<&Team> {
        self.state.top_teams(count)
    }

    fn team_name(&self, id: TeamId) -> &str {
        self.state.team(id).map_or("", |t| t.name.as_str())
    }

    fn team_names(&self, ids: &[TeamId]) -> Vec<&str> {
        ids.iter().map(|&id| self.team_name(id)).collect()
    }
}
