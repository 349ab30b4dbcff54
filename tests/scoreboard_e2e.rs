//! End-to-end scoreboard tests
//!
//! Drives the public engine API through whole games and checks the
//! properties that must hold after every operation.

use similar_asserts::assert_eq;
use trivia_scoreboard::{
    core::{seed_roster, TeamId, POINT_OPTIONS},
    game::{
        ranking::ranks_consistent, run_demo, Cue, RandomModerator, RecordingCues, Round,
        Scoreboard, TickOutcome,
    },
    TriviaError,
};

fn engine() -> Scoreboard<RecordingCues> {
    let mut engine = Scoreboard::with_cues(RecordingCues::new());
    engine.logger_mut().enable_capture();
    engine
}

fn id(n: u32) -> TeamId {
    TeamId::new(n)
}

/// Award log total must always match the sum of team scores
fn assert_totals_agree(engine: &Scoreboard<RecordingCues>) {
    let state = engine.state();
    let team_total: u64 = state.teams.iter().map(|t| u64::from(t.score)).sum();
    assert_eq!(state.awards.total_points(), team_total);
}

#[test]
fn test_two_awards_reorder_ranks() {
    let mut engine = engine();
    engine.award_points(id(1), 100).unwrap();
    engine.award_points(id(2), 200).unwrap();

    let state = engine.state();
    let t1 = state.team(id(1)).unwrap();
    let t2 = state.team(id(2)).unwrap();
    assert_eq!((t2.rank, t2.score), (1, 200));
    assert_eq!((t1.rank, t1.score), (2, 100));
    assert_eq!(state.awards.len(), 2);
    assert!(ranks_consistent(&state.teams));
    assert_totals_agree(&engine);
}

#[test]
fn test_advance_snapshots_top_four() {
    let mut engine = engine();
    engine.award_points(id(3), 500).unwrap();
    engine.award_points(id(5), 300).unwrap();
    engine.advance_to_finals().unwrap();

    let state = engine.state();
    assert_eq!(state.current_round, Round::Final);
    assert_eq!(state.teams.len(), 7);
    assert_eq!(state.finalists().to_vec(), vec![id(3), id(5), id(1), id(2)]);
    for &finalist in state.finalists() {
        assert_eq!(state.team(finalist).unwrap().rank, 1);
    }
    assert!(!state.can_score(id(4)));
    assert!(state.can_score(id(2)));
}

#[test]
fn test_advance_rejected_before_any_score() {
    let mut engine = engine();
    assert_eq!(engine.advance_to_finals(), Err(TriviaError::NoScoresYet));
    assert_eq!(engine.state().current_round, Round::Rubric);
    assert!(engine.state().finalists().is_empty());
}

#[test]
fn test_ranks_stay_consistent_through_rubric() {
    let mut engine = engine();
    let awards = [(4, 150), (2, 150), (7, 50), (4, 300), (1, 500), (2, 200)];
    for (team, points) in awards {
        engine.award_points(id(team), points).unwrap();
        assert!(ranks_consistent(&engine.state().teams));
        assert_totals_agree(&engine);
    }

    let order: Vec<u32> = engine
        .top_teams(7)
        .iter()
        .map(|t| t.id.as_u32())
        .collect();
    assert_eq!(order, vec![1, 4, 2, 7, 3, 5, 6]);
}

#[test]
fn test_rejections_leave_state_untouched() {
    let mut engine = engine();
    engine.award_points(id(6), 250).unwrap();
    let before = serde_json::to_value(engine.state()).unwrap();

    assert_eq!(
        engine.award_points(id(42), 100),
        Err(TriviaError::TeamNotFound(id(42)))
    );
    assert_eq!(
        engine.award_points(id(6), 0),
        Err(TriviaError::InvalidPoints(0))
    );
    assert_eq!(
        engine.set_selected_points(0),
        Err(TriviaError::InvalidPoints(0))
    );
    assert_eq!(engine.start_timer(0), Err(TriviaError::InvalidDuration(0)));

    let after = serde_json::to_value(engine.state()).unwrap();
    assert_eq!(before, after);
    assert_eq!(engine.cues().count(Cue::Success), 1);
}

#[test]
fn test_finished_game_is_terminal_until_reset() {
    let mut engine = engine();
    engine.award_points(id(4), 300).unwrap();
    engine.finish_game().unwrap();

    assert_eq!(engine.state().current_round, Round::Finished);
    assert!(engine.state().show_confetti);
    assert_eq!(engine.state().winner().map(|t| t.id), Some(id(4)));
    assert_eq!(
        engine.award_points(id(4), 100),
        Err(TriviaError::WrongRound(Round::Finished))
    );
    assert_eq!(
        engine.advance_to_finals(),
        Err(TriviaError::WrongRound(Round::Finished))
    );
    assert!(engine.finish_game().is_err());
    assert_eq!(engine.cues().count(Cue::Victory), 1);

    engine.reset_game();
    assert_eq!(engine.state().current_round, Round::Rubric);
    engine.award_points(id(4), 100).unwrap();
}

#[test]
fn test_reset_restores_seed_roster_from_every_round() {
    for rounds_played in 0..3 {
        let mut engine = engine();
        engine.toggle_theme();
        engine.set_selected_points(500).unwrap();
        engine.award_points(id(2), 200).unwrap();
        if rounds_played >= 1 {
            engine.advance_to_finals().unwrap();
            engine.award_points(id(2), 100).unwrap();
        }
        if rounds_played >= 2 {
            engine.finish_game().unwrap();
        }
        engine.start_timer(45).unwrap();

        engine.reset_game();
        let state = engine.state();
        assert_eq!(state.teams, seed_roster());
        assert!(state.awards.is_empty());
        assert_eq!(state.current_round, Round::Rubric);
        assert_eq!(state.timer.remaining(), 30);
        assert!(!state.timer.is_running());
        assert!(!state.show_confetti);
        assert!(state.finalists().is_empty());
        assert_eq!(state.selected_points, 500);
        assert_eq!(format!("{:?}", state.theme), "Light");
    }
}

#[test]
fn test_thirty_ticks_expire_the_timer() {
    let mut engine = engine();
    let token = engine.start_timer(30).unwrap();
    for expected in (1..30).rev() {
        assert_eq!(engine.tick(token), TickOutcome::Counted(expected));
    }
    assert_eq!(engine.tick(token), TickOutcome::Expired);

    let timer = &engine.state().timer;
    assert_eq!(timer.remaining(), 0);
    assert!(!timer.is_running());
    assert_eq!(engine.tick(token), TickOutcome::Ignored);
    assert_eq!(engine.cues().played().to_vec(), vec![Cue::TimeUp]);
}

#[test]
fn test_stale_tokens_after_reset() {
    let mut engine = engine();
    let tick = engine.start_timer(30).unwrap();
    engine.award_points(id(1), 50).unwrap();
    let celebration = engine.finish_game().unwrap();

    engine.reset_game();
    assert_eq!(engine.tick(tick), TickOutcome::Ignored);
    assert!(!engine.clear_celebration(celebration));
    assert_eq!(engine.state().timer.remaining(), 30);

    // A fresh timer after reset must not accept the old token
    let fresh = engine.start_timer(30).unwrap();
    assert_ne!(fresh, tick);
    assert_eq!(engine.tick(tick), TickOutcome::Ignored);
    assert_eq!(engine.tick(fresh), TickOutcome::Counted(29));
}

#[test]
fn test_demo_games_keep_invariants() {
    for seed in [1u64, 17, 256, 9001] {
        let mut engine = engine();
        let result = run_demo(&mut engine, &mut RandomModerator::with_seed(seed), 15);

        let state = engine.state();
        assert_eq!(state.current_round, Round::Finished);
        assert_totals_agree(&engine);
        assert_eq!(result.total_points, state.total_score());
        assert!(state
            .awards
            .records()
            .iter()
            .all(|r| POINT_OPTIONS.contains(&r.points)));
        for record in state.awards.in_round(Round::Final) {
            assert!(state.is_finalist(record.team_id));
        }
        assert_eq!(result.winner, state.winner().map(|t| t.id));
    }
}

#[test]
fn test_overflowing_award_keeps_totals_in_step() {
    let mut engine = engine();
    engine.award_points(id(1), u32::MAX).unwrap();

    assert_eq!(
        engine.award_points(id(1), 10),
        Err(TriviaError::ScoreOverflow {
            team: id(1),
            points: 10
        })
    );
    assert_eq!(engine.state().awards.len(), 1);
    assert_eq!(engine.state().team(id(1)).unwrap().score, u32::MAX);
    assert_totals_agree(&engine);
}

#[cfg(feature = "verbose-logging")]
#[test]
fn test_logs_record_the_game() {
    let mut engine = engine();
    engine.award_points(id(5), 200).unwrap();
    engine.advance_to_finals().unwrap();
    let _ = engine.award_points(id(99), 100);

    let awards = engine.logger().logs_in("award");
    assert_eq!(awards.len(), 1);
    assert_eq!(awards[0].message, "Smart Cookies +200 (200 total)");
    assert_eq!(engine.logger().logs_in("round").len(), 1);
}
