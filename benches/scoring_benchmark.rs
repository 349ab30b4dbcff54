//! Performance benchmarks for the scoreboard engine
//!
//! Measures the hot paths a live game exercises on every click:
//!
//! 1. **Award** - one award, including rank recomputation and the log append
//! 2. **Ranking** - `assign_ranks` over rosters of increasing size
//! 3. **Demo** - a whole seeded game driven by the random moderator

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trivia_scoreboard::{
    core::{Team, TeamId},
    game::{ranking, run_demo, RandomModerator, Scoreboard, VerbosityLevel},
};

fn quiet_engine() -> Scoreboard {
    let mut engine = Scoreboard::new();
    engine.logger_mut().set_verbosity(VerbosityLevel::Silent);
    engine
}

fn bench_award(c: &mut Criterion) {
    let mut group = c.benchmark_group("award");

    group.bench_function("award_points", |b| {
        let mut engine = quiet_engine();
        let mut next = 0u32;
        b.iter(|| {
            // Keep the award log bounded
            if engine.state().awards.len() >= 10_000 {
                engine.reset_game();
            }
            next = next % 7 + 1;
            engine
                .award_points(black_box(TeamId::new(next)), black_box(100))
                .expect("seed team accepts points")
        });
    });

    group.bench_function("top_teams", |b| {
        let mut engine = quiet_engine();
        for n in 1..=7 {
            engine
                .award_points(TeamId::new(n), n * 50)
                .expect("seed team accepts points");
        }
        b.iter(|| black_box(engine.top_teams(black_box(4))).len());
    });

    group.finish();
}

fn roster(size: u32) -> Vec<Team> {
    (1..=size)
        .map(|n| {
            let mut team = Team::new(TeamId::new(n), format!("Team {n}"), "*", "plain");
            team.score = (n * 7919) % 1000;
            team
        })
        .collect()
}

fn bench_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("ranking");

    for size in [7u32, 64, 1024] {
        let teams = roster(size);
        group.bench_with_input(BenchmarkId::new("assign_ranks", size), &teams, |b, teams| {
            let mut teams = teams.clone();
            b.iter(|| ranking::assign_ranks(black_box(&mut teams)));
        });
    }

    group.finish();
}

fn bench_demo(c: &mut Criterion) {
    let mut group = c.benchmark_group("demo");
    group.sample_size(20);

    let seed = 42u64;
    group.bench_with_input(BenchmarkId::new("full_game", seed), &seed, |b, &seed| {
        b.iter(|| {
            let mut engine = quiet_engine();
            let mut moderator = RandomModerator::with_seed(black_box(seed));
            run_demo(&mut engine, &mut moderator, 20)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_award, bench_ranking, bench_demo);
criterion_main!(benches);
