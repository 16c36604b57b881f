//! Uniform random playouts.
//!
//! Every round each player picks uniformly among its legal actions. Used
//! to smoke-test games end to end and as a baseline opponent.

use log::{debug, trace};

use crate::core::{EngineResult, GameRng, JointAction, PlayerId, PlayerMap};
use crate::rules::{CurrentPlayer, RulesEngine};

use super::trajectory::Trajectory;

/// Configuration for random playouts.
#[derive(Clone, Debug)]
pub struct PlayoutConfig {
    /// Maximum joint actions per game (guards against games that never end).
    pub max_rounds: usize,

    /// Seed offset for RNG (combined with the game seed).
    pub seed_offset: u64,
}

impl Default for PlayoutConfig {
    fn default() -> Self {
        Self {
            max_rounds: 10_000,
            seed_offset: 0,
        }
    }
}

impl PlayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum joint actions per game.
    pub fn with_max_rounds(mut self, max: usize) -> Self {
        self.max_rounds = max;
        self
    }

    /// Set seed offset.
    pub fn with_seed_offset(mut self, offset: u64) -> Self {
        self.seed_offset = offset;
        self
    }
}

/// Worker that plays random games of one engine.
pub struct RandomPlayout<E: RulesEngine> {
    engine: E,
    config: PlayoutConfig,
}

impl<E: RulesEngine> RandomPlayout<E> {
    pub fn new(engine: E, config: PlayoutConfig) -> Self {
        Self { engine, config }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn config(&self) -> &PlayoutConfig {
        &self.config
    }

    /// Play a fresh game to the end.
    pub fn play(&self, seed: u64) -> EngineResult<Trajectory> {
        let mut state = self.engine.new_initial_state();
        self.play_from(&mut state, seed)
    }

    /// Continue a game from `state` until it ends or `max_rounds` is hit.
    ///
    /// The engine's invariants are checked on entry and after every round;
    /// a violation aborts the playout with the engine's error. `state` is
    /// left at the last reached position.
    pub fn play_from(&self, state: &mut E::State, seed: u64) -> EngineResult<Trajectory> {
        let player_count = self.engine.player_count();
        let mut rng = GameRng::new(seed.wrapping_add(self.config.seed_offset));
        let mut trajectory = Trajectory::new(seed, player_count);
        self.engine.check_invariants(state)?;

        for _ in 0..self.config.max_rounds {
            if self.engine.current_player(state) == CurrentPlayer::Terminal {
                break;
            }

            let Some(joint) = self.sample_joint_action(state, &mut rng)? else {
                // A player without legal actions in a running game.
                break;
            };
            self.engine.apply_joint_action(state, joint.as_slice())?;
            self.engine.check_invariants(state)?;

            let rewards = self.engine.rewards(state);
            debug_assert_eq!(rewards.len(), player_count);
            trace!("playout round {}: {:?} -> {:?}", trajectory.len(), joint, rewards);
            trajectory.push(joint, rewards);
        }

        let returns = self.engine.returns(state);
        debug_assert_eq!(returns.len(), player_count);
        let result = self.engine.is_terminal(state);
        debug!(
            "playout seed {} finished after {} rounds: {:?}",
            seed,
            trajectory.len(),
            result
        );
        trajectory.set_outcome(PlayerMap::from(returns), result);
        Ok(trajectory)
    }

    /// Play `num_games` games, each seeded from a fork of `base_seed`.
    pub fn play_many(&self, num_games: usize, base_seed: u64) -> EngineResult<Vec<Trajectory>> {
        let mut seeds = GameRng::new(base_seed);
        (0..num_games)
            .map(|_| self.play(seeds.fork().seed()))
            .collect()
    }

    fn sample_joint_action(
        &self,
        state: &E::State,
        rng: &mut GameRng,
    ) -> EngineResult<Option<JointAction>> {
        let mut choices = Vec::with_capacity(self.engine.player_count());
        for player in PlayerId::all(self.engine.player_count()) {
            let legal = self.engine.legal_actions(state, player)?;
            match rng.choose(&legal) {
                Some(&action) => choices.push(action),
                None => return Ok(None),
            }
        }
        Ok(Some(JointAction::new(&choices)))
    }
}
