//! Append-only award history
//!
//! Every call that awards points leaves one `AwardRecord` behind. Records
//! are never edited; the log is only ever appended to or cleared wholesale
//! by a game reset. It backs the audit trail and the header statistics.

use crate::core::{AwardId, TeamId};
use crate::game::Round;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One awarded question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardRecord {
    /// Sequential id within the current game
    pub id: AwardId,

    /// Round the award happened in
    pub round: Round,

    /// Points awarded
    pub points: u32,

    /// Team that received the points
    pub team_id: TeamId,

    /// Wall-clock time of the award
    pub timestamp: DateTime<Utc>,
}

/// Aggregate numbers shown above the scoreboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreStats {
    pub teams: usize,
    pub questions: usize,
    pub total_points: u64,
    pub rubric_questions: usize,
    pub final_questions: usize,
}

/// Append-only log of award records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardLog {
    records: Vec<AwardRecord>,
}

impl AwardLog {
    pub fn new() -> Self {
        AwardLog::default()
    }

    /// Append a record stamped with the current time
    pub fn record(&mut self, round: Round, team_id: TeamId, points: u32) -> &AwardRecord {
        self.record_at(round, team_id, points, Utc::now())
    }

    /// Append a record with an explicit timestamp
    pub fn record_at(
        &mut self,
        round: Round,
        team_id: TeamId,
        points: u32,
        timestamp: DateTime<Utc>,
    ) -> &AwardRecord {
        let id = AwardId::new(self.records.len() as u32 + 1);
        self.records.push(AwardRecord {
            id,
            round,
            points,
            team_id,
            timestamp,
        });
        &self.records[self.records.len() - 1]
    }

    pub fn records(&self) -> &[AwardRecord] {
        &self.records
    }

    pub fn last(&self) -> Option<&AwardRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn total_points(&self) -> u64 {
        self.records.iter().map(|r| u64::from(r.points)).sum()
    }

    /// Points a single team collected across the log
    pub fn points_for(&self, team_id: TeamId) -> u64 {
        self.records
            .iter()
            .filter(|r| r.team_id == team_id)
            .map(|r| u64::from(r.points))
            .sum()
    }

    pub fn in_round(&self, round: Round) -> impl Iterator<Item = &AwardRecord> {
        self.records.iter().filter(move |r| r.round == round)
    }
}
