//! Game flow tests: configuration, round bookkeeping, terminal outcome
//! and returns.

use bertrand_oligopoly::core::{GameConfig, GameError, GameParams, ParamValue, PlayerId};
use bertrand_oligopoly::games::bertrand::BertrandGame;
use bertrand_oligopoly::playout::{PlayoutConfig, RandomPlayout};
use bertrand_oligopoly::rules::{GameResult, RulesEngine};
use bertrand_oligopoly::ReturnsType;

fn params(json: &str) -> GameParams {
    serde_json::from_str(json).unwrap()
}

/// Test loading the game from host parameters given as JSON.
#[test]
fn test_from_params_json() {
    let game = BertrandGame::from_params(&params(
        r#"{"players": 3, "num_turns": 7, "imp_info": true, "returns_type": "point_difference",
            "horizontal_differentiation": 0.5}"#,
    ))
    .unwrap();

    let config = game.config();
    assert_eq!(config.players, 3);
    assert_eq!(config.num_turns, 7);
    assert!(config.imp_info);
    assert_eq!(config.returns_type, ReturnsType::PointDifference);
    assert_eq!(config.horizontal_differentiation, 0.5);
    assert_eq!(game.max_game_length(), 7);
}

/// Test that configuration errors are fatal at construction.
#[test]
fn test_configuration_errors() {
    let cases = [
        (r#"{"returns_type": "winner_take_all"}"#, GameError::UnknownReturnsType("winner_take_all".into())),
        (r#"{"num_options": 1}"#, GameError::TooFewOptions(1)),
        (r#"{"num_turns": 0}"#, GameError::NoTurns),
        (r#"{"players": 12}"#, GameError::PlayerCountOutOfRange(12)),
        (r#"{"horizontal_differentiation": -1.0}"#, GameError::NonPositiveDifferentiation(-1.0)),
        (r#"{"cards": 3}"#, GameError::UnknownParameter("cards".into())),
    ];

    for (json, expected) in cases {
        let err = BertrandGame::from_params(&params(json)).unwrap_err();
        assert!(err.is_config_error(), "{} should be a config error", err);
        assert_eq!(err, expected);
    }

    let mut p = GameParams::default();
    p.insert("players".to_string(), ParamValue::Str("two".to_string()));
    assert!(matches!(
        BertrandGame::from_params(&p),
        Err(GameError::ParameterType { .. })
    ));
}

/// Test the history invariants over a full random game.
#[test]
fn test_history_lengths_track_turns() {
    let game = BertrandGame::new(GameConfig::default().with_num_turns(25).with_players(3)).unwrap();
    let playout = RandomPlayout::new(game, PlayoutConfig::new().with_max_rounds(1));
    let mut state = playout.engine().new_initial_state();

    for turn in 1..=25 {
        assert!(!state.is_terminal());
        playout.play_from(&mut state, turn as u64).unwrap();

        assert_eq!(state.current_turn(), turn);
        assert_eq!(state.actions_history().len(), turn);
        assert_eq!(state.win_sequence().len(), turn);
    }
    assert!(state.is_terminal());
    assert!(!state.winners().is_empty());
}

/// Test a single-round game.
#[test]
fn test_single_turn_game() {
    let game = BertrandGame::new(GameConfig::default().with_num_turns(1)).unwrap();
    let mut state = game.new_initial_state();

    game.apply_joint_action(&mut state, &[2, 6]).unwrap();

    assert!(state.is_terminal());
    assert_eq!(state.current_turn(), 1);
    // The cheaper firm earns more on the default grid.
    assert_eq!(state.winners(), &[PlayerId::new(0)]);
    assert_eq!(
        game.is_terminal(&state),
        Some(GameResult::Winner(PlayerId::new(0)))
    );
}

/// Test that identical prices give identical profits and a full draw.
#[test]
fn test_symmetric_prices_draw() {
    let game = BertrandGame::new(
        GameConfig::default()
            .with_num_turns(3)
            .with_players(4)
            .with_returns_type(ReturnsType::WinLoss),
    )
    .unwrap();
    let mut state = game.new_initial_state();
    for a in [0, 7, 14] {
        game.apply_joint_action(&mut state, &[a; 4]).unwrap();
    }

    let points = state.points().as_slice();
    assert!(points.iter().all(|&p| p == points[0]));
    assert_eq!(state.winners().len(), 4);
    assert_eq!(game.is_terminal(&state), Some(GameResult::Draw));
    assert_eq!(game.returns(&state), vec![0.0; 4]);
    // Every round is a tie at the lowest tier.
    assert!(state.win_sequence().iter().all(Option::is_none));
}

/// Test the three returns policies against accumulated points.
#[test]
fn test_returns_policies() {
    let rounds: [&[usize]; 3] = [&[0, 5, 10], &[3, 3, 1], &[14, 2, 2]];

    let play = |returns_type: ReturnsType| {
        let game = BertrandGame::new(
            GameConfig::default()
                .with_num_turns(3)
                .with_players(3)
                .with_returns_type(returns_type),
        )
        .unwrap();
        let mut state = game.new_initial_state();
        for actions in rounds {
            game.apply_joint_action(&mut state, actions).unwrap();
        }
        (game.returns(&state), state)
    };

    let (total, state) = play(ReturnsType::TotalPoints);
    assert_eq!(total, state.points().as_slice());

    let (diff, _) = play(ReturnsType::PointDifference);
    let mean = total.iter().sum::<f64>() / 3.0;
    for (d, t) in diff.iter().zip(&total) {
        assert!((d - (t - mean)).abs() < 1e-12);
    }
    assert!(diff.iter().sum::<f64>().abs() < 1e-12);

    let (win_loss, state) = play(ReturnsType::WinLoss);
    assert_eq!(state.winners().len(), 1);
    let winner = state.winners()[0];
    for player in PlayerId::all(3) {
        let expected = if player == winner { 1.0 } else { -0.5 };
        assert_eq!(win_loss[player.index()], expected);
    }
}

/// Test that cloning a state branches it.
#[test]
fn test_clone_branches_independently() {
    let game = BertrandGame::new(GameConfig::default().with_num_turns(4)).unwrap();
    let mut state = game.new_initial_state();
    game.apply_joint_action(&mut state, &[1, 2]).unwrap();

    let mut branch = state.clone();
    game.apply_joint_action(&mut branch, &[9, 9]).unwrap();

    assert_eq!(state.current_turn(), 1);
    assert_eq!(branch.current_turn(), 2);
    assert_eq!(state.actions_history().len(), 1);
    assert_eq!(branch.actions_history()[0], state.actions_history()[0]);
}

/// Test the game-level queries.
#[test]
fn test_game_level_queries() {
    let game = BertrandGame::new(GameConfig::default().with_players(3).with_num_options(6)).unwrap();

    assert_eq!(game.num_players(), 3);
    assert_eq!(game.num_distinct_actions(), 6);
    assert_eq!(game.max_chance_outcomes(), 0);
    assert_eq!(game.information_state_tensor_shape(), vec![18]);
    assert_eq!(game.observation_tensor_shape(), vec![18]);
    assert!(game.min_utility() <= 0.0);
    assert!(game.max_utility() > 0.0);
}

/// Test that round profits are evaluated exactly as
/// `((p - c) * exp((q - p) / h)) / (exp(og / h) + sum exp((q - p_i) / h))`,
/// summing the outside good first. Terminal winners compare points with
/// `==`, so the last bit matters.
#[test]
fn test_round_profits_match_reference_expression() {
    for players in [2usize, 3, 5] {
        let game = BertrandGame::new(GameConfig::default().with_players(players)).unwrap();
        let config = game.config();
        let grid = game.price_grid();
        let h = config.horizontal_differentiation;
        let og = config.outside_good as f64;
        let mc = config.marginal_cost as f64;
        let quality = vec![2.0; players];

        for seed in 0..15usize * 15 {
            let actions: Vec<usize> = (0..players).map(|p| (seed / (p + 1) + 7 * p) % 15).collect();

            let mut denominator = (og / h).exp();
            for &a in &actions {
                let price = (a as f64 * grid.step()) + grid.lo();
                denominator += ((2.0 - price) / h).exp();
            }
            let expected: Vec<f64> = actions
                .iter()
                .map(|&a| {
                    let price = (a as f64 * grid.step()) + grid.lo();
                    ((price - mc) * ((2.0 - price) / h).exp()) / denominator
                })
                .collect();

            assert_eq!(game.round_profits(&actions, &quality), expected, "actions {:?}", actions);
        }
    }
}

/// Test that a non-finite interval is refused at construction.
#[test]
fn test_non_finite_interval_rejected() {
    for size in [f64::INFINITY, f64::NEG_INFINITY] {
        assert_eq!(
            BertrandGame::new(GameConfig::default().with_interval_size(size)).unwrap_err(),
            GameError::InvalidInterval(size)
        );
    }
    assert!(matches!(
        BertrandGame::new(GameConfig::default().with_interval_size(f64::NAN)),
        Err(GameError::InvalidInterval(_))
    ));
}
