//! Rules engine trait for simultaneous-move games.
//!
//! Games implement `RulesEngine` to define their rules:
//! - What actions each player may choose
//! - How a joint action modifies state
//! - Terminal outcome and returns

use std::ops::Range;

use crate::core::action::{num_flat_joint_actions, Action, JointAction};
use crate::core::error::EngineResult;
use crate::core::player::PlayerId;

/// Who acts at a given state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurrentPlayer {
    /// Every player chooses at once.
    Simultaneous,
    /// The game is over.
    Terminal,
}

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Every player tied for the top score.
    Draw,
    /// Several (but not all) players tied for the top score.
    Winners(Vec<PlayerId>),
}

impl GameResult {
    /// Build a result from the set of top scorers.
    #[must_use]
    pub fn from_winners(winners: &[PlayerId], player_count: usize) -> Self {
        match winners {
            [single] if player_count > 1 => GameResult::Winner(*single),
            _ if winners.len() == player_count => GameResult::Draw,
            _ => GameResult::Winners(winners.to_vec()),
        }
    }

    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
            GameResult::Draw => false,
        }
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: Return empty vec once the game is over
/// - `apply_joint_action`: Must be deterministic and leave the state
///   untouched when it returns an error
/// - `is_terminal`: Return None if game continues
/// - `rewards`: All zero before the first joint action
/// - `check_invariants`: Override to let playouts detect corrupt states
pub trait RulesEngine {
    /// Mutable game state.
    type State: Clone;

    /// Number of players.
    fn player_count(&self) -> usize;

    /// Size of every player's action space.
    fn num_distinct_actions(&self) -> usize;

    /// A fresh state at turn 0.
    fn new_initial_state(&self) -> Self::State;

    /// Who acts at `state`.
    fn current_player(&self, state: &Self::State) -> CurrentPlayer;

    /// Legal actions of one player.
    fn legal_actions(&self, state: &Self::State, player: PlayerId) -> EngineResult<Vec<Action>>;

    /// Apply one action per player.
    fn apply_joint_action(&self, state: &mut Self::State, actions: &[Action]) -> EngineResult<()>;

    /// Check if the game is over.
    ///
    /// Returns `Some(result)` if the game has ended, `None` if it continues.
    fn is_terminal(&self, state: &Self::State) -> Option<GameResult>;

    /// Per-player returns; all zero before the end.
    fn returns(&self, state: &Self::State) -> Vec<f64>;

    /// Per-player reward of the most recent joint action.
    fn rewards(&self, state: &Self::State) -> Vec<f64>;

    /// Human-readable action.
    fn action_to_string(&self, player: PlayerId, action: Action) -> EngineResult<String>;

    /// Verify that `state` is consistent with this game.
    ///
    /// Returns `GameError::CorruptState` describing the first violation.
    fn check_invariants(&self, _state: &Self::State) -> EngineResult<()> {
        Ok(())
    }

    // === Flat joint actions ===

    /// Size of the joint action space.
    fn num_flat_joint_actions(&self) -> u64 {
        num_flat_joint_actions(self.player_count(), self.num_distinct_actions())
    }

    /// Every flat joint action index, or none once the game is over.
    ///
    /// Returned as a range: the space is `O^P` and does not fit in memory
    /// for large markets.
    fn legal_flat_joint_actions(&self, state: &Self::State) -> Range<u64> {
        match self.current_player(state) {
            CurrentPlayer::Terminal => 0..0,
            CurrentPlayer::Simultaneous => 0..self.num_flat_joint_actions(),
        }
    }

    /// Apply a joint action given as a flat index.
    fn apply_flat_joint_action(&self, state: &mut Self::State, flat: u64) -> EngineResult<()> {
        let joint = JointAction::from_flat(flat, self.player_count(), self.num_distinct_actions())?;
        self.apply_joint_action(state, joint.as_slice())
    }

    /// `[a0, a1, ...]` with each player's action string.
    fn flat_joint_action_to_string(&self, flat: u64) -> EngineResult<String> {
        let joint = JointAction::from_flat(flat, self.player_count(), self.num_distinct_actions())?;
        let parts = PlayerId::all(self.player_count())
            .map(|p| self.action_to_string(p, joint.get(p)))
            .collect::<EngineResult<Vec<_>>>()?;
        Ok(format!("[{}]", parts.join(", ")))
    }
}
