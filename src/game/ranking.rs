//! Rank computation
//!
//! Rank is derived data: a pure function of the roster's scores and its
//! insertion order. Nothing else writes `Team::rank` except the finals
//! baseline applied at qualification.

use crate::core::{Team, TeamId};

/// Roster indices ordered by descending score, ties kept in roster order
///
/// `sort_by` is a stable sort, so equal scores never swap.
pub fn standings(teams: &[Team]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..teams.len()).collect();
    order.sort_by(|&a, &b| teams[b].score.cmp(&teams[a].score));
    order
}

/// Recompute `rank` for every team
///
/// Roster order itself is left untouched.
pub fn assign_ranks(teams: &mut [Team]) {
    for (position, idx) in standings(teams).into_iter().enumerate() {
        teams[idx].rank = position as u32 + 1;
    }
}

/// The `count` highest-scoring teams, best first
///
/// Works on a view of indices so the canonical roster keeps its order.
pub fn top_teams(teams: &[Team], count: usize) -> Vec<&Team> {
    standings(teams)
        .into_iter()
        .take(count)
        .map(|idx| &teams[idx])
        .collect()
}

/// Ids of the `count` highest-scoring teams, best first
pub fn top_team_ids(teams: &[Team], count: usize) -> Vec<TeamId> {
    top_teams(teams, count).into_iter().map(|t| t.id).collect()
}

/// Do the stored ranks form a permutation of 1..N that agrees with scores?
pub fn ranks_consistent(teams: &[Team]) -> bool {
    let mut seen = vec![false; teams.len()];
    for team in teams {
        let rank = team.rank as usize;
        if rank == 0 || rank > teams.len() || seen[rank - 1] {
            return false;
        }
        seen[rank - 1] = true;
    }

    standings(teams)
        .into_iter()
        .enumerate()
        .all(|(position, idx)| teams[idx].rank as usize == position + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::seed_roster;

    fn with_scores(scores: &[u32]) -> Vec<Team> {
        let mut teams = seed_roster();
        for (team, &score) in teams.iter_mut().zip(scores) {
            team.score = score;
        }
        teams
    }

    #[test]
    fn test_assign_ranks_descending() {
        let mut teams = with_scores(&[100, 200, 0, 0, 0, 0, 0]);
        assign_ranks(&mut teams);

        assert_eq!(teams[1].rank, 1);
        assert_eq!(teams[0].rank, 2);
        assert_eq!(teams[2].rank, 3);
        assert_eq!(teams[6].rank, 7);
        assert!(ranks_consistent(&teams));
    }

    #[test]
    fn test_ties_keep_roster_order() {
        let mut teams = with_scores(&[50, 300, 50, 300, 0, 50, 0]);
        assign_ranks(&mut teams);

        let ranks: Vec<u32> = teams.iter().map(|t| t.rank).collect();
        assert_eq!(ranks, vec![3, 1, 4, 2, 6, 5, 7]);
    }

    #[test]
    fn test_roster_order_untouched() {
        let mut teams = with_scores(&[0, 0, 500, 0, 300, 0, 0]);
        assign_ranks(&mut teams);
        let ids: Vec<u32> = teams.iter().map(|t| t.id.as_u32()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_top_teams() {
        let teams = with_scores(&[0, 0, 500, 0, 300, 0, 0]);
        let top: Vec<u32> = top_teams(&teams, 4).iter().map(|t| t.id.as_u32()).collect();
        assert_eq!(top, vec![3, 5, 1, 2]);

        assert_eq!(top_teams(&teams, 1)[0].id, TeamId::new(3));
        assert_eq!(top_teams(&teams, 20).len(), 7);
        assert!(top_teams(&teams, 0).is_empty());
    }

    #[test]
    fn test_ranks_consistent_detects_drift() {
        let mut teams = with_scores(&[100, 0, 0, 0, 0, 0, 0]);
        assign_ranks(&mut teams);
        assert!(ranks_consistent(&teams));

        teams[3].score = 400;
        assert!(!ranks_consistent(&teams));

        assign_ranks(&mut teams);
        teams[0].rank = teams[1].rank;
        assert!(!ranks_consistent(&teams));
    }

    #[test]
    fn test_empty_roster() {
        let mut teams: Vec<Team> = Vec::new();
        assign_ranks(&mut teams);
        assert!(top_teams(&teams, 4).is_empty());
        assert!(ranks_consistent(&teams));
    }
}
