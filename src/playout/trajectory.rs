//! Record of one played game.

use crate::core::{Action, JointAction, PlayerId, PlayerMap};
use crate::rules::GameResult;

/// One applied joint action.
#[derive(Clone, Debug, PartialEq)]
pub struct Round {
    /// Round number (0-indexed).
    pub round: usize,

    /// What every player chose.
    pub actions: JointAction,

    /// Per-player reward of this round.
    pub rewards: Vec<f64>,
}

/// A complete game from a playout.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    pub rounds: Vec<Round>,

    /// Final returns per player.
    pub returns: PlayerMap<f64>,

    /// Terminal result, `None` if the playout stopped early.
    pub result: Option<GameResult>,

    /// Random seed used for this game.
    pub seed: u64,
}

impl Trajectory {
    pub fn new(seed: u64, player_count: usize) -> Self {
        Self {
            rounds: Vec::new(),
            returns: PlayerMap::with_value(player_count, 0.0),
            result: None,
            seed,
        }
    }

    /// Add a round.
    pub fn push(&mut self, actions: JointAction, rewards: Vec<f64>) {
        let round = self.rounds.len();
        self.rounds.push(Round {
            round,
            actions,
            rewards,
        });
    }

    /// Set the final outcome.
    pub fn set_outcome(&mut self, returns: PlayerMap<f64>, result: Option<GameResult>) {
        self.returns = returns;
        self.result = result;
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// True if the game reached a terminal state.
    pub fn is_complete(&self) -> bool {
        self.result.is_some()
    }

    /// One player's choices, oldest first.
    pub fn player_actions(&self, player: PlayerId) -> impl Iterator<Item = Action> + '_ {
        self.rounds.iter().map(move |r| r.actions.get(player))
    }

    /// Sum of every round's rewards per player.
    pub fn total_rewards(&self) -> PlayerMap<f64> {
        let mut totals = PlayerMap::with_value(self.returns.player_count(), 0.0);
        for round in &self.rounds {
            for (player, &reward) in PlayerId::all(totals.player_count()).zip(&round.rewards) {
                totals[player] += reward;
            }
        }
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trajectory_basic() {
        let mut traj = Trajectory::new(42, 2);
        assert!(traj.is_empty());
        assert!(!traj.is_complete());

        traj.push(JointAction::new(&[1, 3]), vec![0.25, 0.5]);
        traj.push(JointAction::new(&[2, 2]), vec![0.25, 0.25]);

        assert_eq!(traj.len(), 2);
        assert_eq!(traj.rounds[1].round, 1);
        assert_eq!(traj.player_actions(PlayerId::new(1)).collect::<Vec<_>>(), vec![3, 2]);
        assert_eq!(traj.total_rewards().as_slice(), &[0.5, 0.75]);
    }

    #[test]
    fn test_set_outcome() {
        let mut traj = Trajectory::new(7, 3);
        traj.set_outcome(
            PlayerMap::from(vec![1.0, -0.5, -0.5]),
            Some(GameResult::Winner(PlayerId::new(0))),
        );

        assert!(traj.is_complete());
        assert_eq!(traj.returns[PlayerId::new(0)], 1.0);
        assert_eq!(traj.seed, 7);
    }
}
