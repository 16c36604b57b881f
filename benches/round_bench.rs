use criterion::{black_box, criterion_group, criterion_main, Criterion};
use bertrand_oligopoly::core::{GameConfig, PlayerId};
use bertrand_oligopoly::games::bertrand::BertrandGame;
use bertrand_oligopoly::playout::{PlayoutConfig, RandomPlayout};
use bertrand_oligopoly::rules::RulesEngine;

fn bench_apply_joint_action(c: &mut Criterion) {
    let game = BertrandGame::new(GameConfig::default().with_players(4)).unwrap();
    let state = game.new_initial_state();

    c.bench_function("apply_joint_action_4p", |b| {
        b.iter(|| {
            let mut s = state.clone();
            game.apply_joint_action(&mut s, black_box(&[3usize, 7, 1, 12][..])).unwrap();
            black_box(s);
        });
    });
}

fn bench_information_state_tensor(c: &mut Criterion) {
    let game = BertrandGame::new(
        GameConfig::default()
            .with_players(3)
            .with_imp_info(true)
            .with_egocentric(true),
    )
    .unwrap();
    let playout = RandomPlayout::new(game.clone(), PlayoutConfig::new().with_max_rounds(50));
    let mut state = game.new_initial_state();
    playout.play_from(&mut state, 7).unwrap();
    let mut values = vec![0.0; game.tensor_size()];

    c.bench_function("information_state_tensor_3p", |b| {
        b.iter(|| {
            game.write_information_state_tensor(black_box(&state), PlayerId::new(1), &mut values)
                .unwrap();
        });
    });
}

fn bench_random_playout(c: &mut Criterion) {
    let game = BertrandGame::new(GameConfig::default()).unwrap();
    let playout = RandomPlayout::new(game, PlayoutConfig::default());

    c.bench_function("random_playout_100_turns", |b| {
        b.iter(|| black_box(playout.play(black_box(42)).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_apply_joint_action,
    bench_information_state_tensor,
    bench_random_playout
);
criterion_main!(benches);
