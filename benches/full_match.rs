use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use ludo_engine::bot::{FirstMovablePolicy, GreedyPolicy, MovePolicy};
use ludo_engine::sim::{play_match, DEFAULT_MAX_COMMANDS};
use ludo_engine::turn::pending_moves;
use ludo_engine::{Color, GameState, MatchConfig, PlayerId, PlayerSpec, TurnController};

fn roster(n: usize) -> Vec<PlayerSpec> {
    Color::ALL
        .iter()
        .take(n)
        .enumerate()
        .map(|(i, &c)| PlayerSpec::new(PlayerId::new(i as u32 + 1), c).bot())
        .collect()
}

fn bench_full_match(c: &mut Criterion) {
    let mut g = c.benchmark_group("ludo_full_match");
    let policies: [&dyn MovePolicy; 2] = [&GreedyPolicy, &FirstMovablePolicy];
    for policy in policies {
        for &n in &[2usize, 4] {
            let players = roster(n);
            g.bench_with_input(BenchmarkId::new(policy.name(), n), &players, |b, players| {
                let mut seed = 0u64;
                b.iter(|| {
                    seed += 1;
                    let mut controller = TurnController::new(MatchConfig::default().with_seed(seed));
                    black_box(play_match(&mut controller, players, policy, DEFAULT_MAX_COMMANDS))
                })
            });
        }
    }
    g.finish();
}

fn bench_greedy_choice(c: &mut Criterion) {
    // A mid-game position with a move pending.
    let mut controller = TurnController::new(MatchConfig::default().with_seed(7));
    let mut state = play_match(&mut controller, &roster(4), &GreedyPolicy, 400)
        .unwrap_or_else(|_| GameState::waiting());
    while state.current_player().is_some() && state.dice_value().is_none() {
        let player = state.current_player().map(|p| p.id).unwrap();
        state = match controller.roll_dice(&state, player) {
            Ok(t) => t.state,
            Err(_) => break,
        };
    }
    let legal = pending_moves(&state);

    c.bench_function("greedy_choose", |b| {
        b.iter(|| black_box(GreedyPolicy.choose(black_box(&state), black_box(&legal))))
    });
}

criterion_group!(benches, bench_full_match, bench_greedy_choice);
criterion_main!(benches);
