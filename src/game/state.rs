//! Main scoreboard state structure

use crate::core::{seed_roster, Team, TeamId, DEFAULT_POINTS};
use crate::game::ranking;
use crate::game::timer::{Countdown, TimerUrgency, DEFAULT_TIMER_SECS};
use crate::game::Round;
use crate::history::{AwardLog, ScoreStats};
use crate::{Result, TriviaError};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Number of teams that qualify for the finals
pub const FINALIST_COUNT: usize = 4;

/// Display theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Finalist snapshot, fixed when the game advances to finals
pub type Finalists = SmallVec<[TeamId; FINALIST_COUNT]>;

/// Complete scoreboard state
///
/// The aggregate root. Only `Scoreboard` mutates it; everything else gets
/// a shared reference and uses the query methods.
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Roster in creation order (never reordered by ranking)
    pub teams: Vec<Team>,

    /// Every award made this game
    pub awards: AwardLog,

    pub current_round: Round,

    /// Points the next award will use
    pub selected_points: u32,

    pub timer: Countdown,

    pub theme: Theme,

    /// Celebration overlay flag, set on finish and cleared after a delay
    pub show_confetti: bool,

    /// Qualifiers captured at `advance_to_finals` (empty before finals)
    pub finalists: Finalists,

    /// TeamId -> roster index
    #[serde(skip)]
    index: FxHashMap<TeamId, usize>,
}

impl GameState {
    /// Fresh game on the seed roster
    pub fn new() -> Self {
        Self::with_timer(DEFAULT_TIMER_SECS)
    }

    /// Fresh game whose countdown defaults to `timer_secs`
    pub fn with_timer(timer_secs: u32) -> Self {
        let mut teams = seed_roster();
        ranking::assign_ranks(&mut teams);
        let index = teams.iter().enumerate().map(|(idx, t)| (t.id, idx)).collect();
        Self::from_parts(teams, index, timer_secs)
    }

    /// Fresh game on an arbitrary roster
    ///
    /// Ranks are recomputed so the stored values are consistent from the
    /// start. A repeated team id is rejected with `DuplicateTeam`.
    pub fn with_roster(mut teams: Vec<Team>, timer_secs: u32) -> Result<Self> {
        ranking::assign_ranks(&mut teams);
        let mut index = FxHashMap::default();
        for (idx, team) in teams.iter().enumerate() {
            if index.insert(team.id, idx).is_some() {
                return Err(TriviaError::DuplicateTeam(team.id));
            }
        }
        Ok(Self::from_parts(teams, index, timer_secs))
    }

    fn from_parts(teams: Vec<Team>, index: FxHashMap<TeamId, usize>, timer_secs: u32) -> Self {
        GameState {
            teams,
            awards: AwardLog::new(),
            current_round: Round::Rubric,
            selected_points: DEFAULT_POINTS,
            timer: Countdown::new(timer_secs),
            theme: Theme::default(),
            show_confetti: false,
            finalists: Finalists::new(),
            index,
        }
    }

    /// Get a team by ID
    pub fn team(&self, id: TeamId) -> Result<&Team> {
        self.index
            .get(&id)
            .map(|&idx| &self.teams[idx])
            .ok_or(TriviaError::TeamNotFound(id))
    }

    /// Get a mutable team by ID
    pub(crate) fn team_mut(&mut self, id: TeamId) -> Result<&mut Team> {
        match self.index.get(&id) {
            Some(&idx) => Ok(&mut self.teams[idx]),
            None => Err(TriviaError::TeamNotFound(id)),
        }
    }

    pub fn contains_team(&self, id: TeamId) -> bool {
        self.index.contains_key(&id)
    }

    /// Resolve a console reference: a numeric id or a case-insensitive name
    pub fn find_team(&self, reference: &str) -> Option<TeamId> {
        let reference = reference.trim();
        if let Ok(id) = reference.parse::<TeamId>() {
            return self.contains_team(id).then_some(id);
        }

        let wanted = reference.to_lowercase();
        self.teams
            .iter()
            .find(|t| t.name.to_lowercase() == wanted)
            .map(|t| t.id)
    }

    /// The `count` highest scorers, best first; the roster is not reordered
    pub fn top_teams(&self, count: usize) -> Vec<&Team> {
        ranking::top_teams(&self.teams, count)
    }

    /// Has any team scored yet?
    pub fn any_scored(&self) -> bool {
        self.teams.iter().any(Team::has_scored)
    }

    /// Guard for `advance_to_finals`
    pub fn can_advance_to_finals(&self) -> bool {
        self.current_round == Round::Rubric && self.any_scored()
    }

    pub fn is_finalist(&self, id: TeamId) -> bool {
        self.finalists.contains(&id)
    }

    /// Presentation gate for a team click
    ///
    /// Any roster team may score in the rubric round, only finalists in the
    /// finals, nobody once finished. The engine itself only refuses the
    /// finished round.
    pub fn can_score(&self, id: TeamId) -> bool {
        match self.current_round {
            Round::Rubric => self.contains_team(id),
            Round::Final => self.is_finalist(id),
            Round::Finished => false,
        }
    }

    pub fn finalists(&self) -> &[TeamId] {
        &self.finalists
    }

    /// The winning team once the game is finished
    pub fn winner(&self) -> Option<&Team> {
        if !self.current_round.is_finished() {
            return None;
        }
        self.top_teams(1).into_iter().next()
    }

    /// Sum of every team's score
    pub fn total_score(&self) -> u64 {
        self.teams.iter().map(|t| u64::from(t.score)).sum()
    }

    pub fn stats(&self) -> ScoreStats {
        ScoreStats {
            teams: self.teams.len(),
            questions: self.awards.len(),
            total_points: self.total_score(),
            rubric_questions: self.awards.in_round(Round::Rubric).count(),
            final_questions: self.awards.in_round(Round::Final).count(),
        }
    }

    pub fn timer_urgency(&self) -> TimerUrgency {
        self.timer.urgency()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
