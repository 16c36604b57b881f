//! Joint actions: one price tier per firm, chosen simultaneously.
//!
//! A player's action is an option index `a` in `[0, num_options)`; the
//! market maps it to a real price. A `JointAction` holds every player's
//! choice for one round, indexed by player.
//!
//! Joint actions can also be addressed by a single flat index (mixed radix,
//! player 0 is the least significant digit) for hosts that enumerate the
//! joint action space.

use smallvec::SmallVec;

use super::error::{EngineResult, GameError};
use super::player::PlayerId;

/// Index of a price tier.
pub type Action = usize;

/// Every player's option index for a single round.
///
/// SmallVec keeps the common 2-4 firm case off the heap.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct JointAction {
    choices: SmallVec<[Action; 4]>,
}

impl JointAction {
    /// Create a joint action from per-player choices (no validation).
    #[must_use]
    pub fn new(choices: &[Action]) -> Self {
        Self {
            choices: SmallVec::from_slice(choices),
        }
    }

    /// Create a joint action, checking arity and range.
    pub fn validated(
        choices: &[Action],
        player_count: usize,
        num_options: usize,
    ) -> EngineResult<Self> {
        if choices.len() != player_count {
            return Err(GameError::WrongArity {
                expected: player_count,
                got: choices.len(),
            });
        }
        if let Some((player, &action)) = choices
            .iter()
            .enumerate()
            .find(|&(_, &a)| a >= num_options)
        {
            return Err(GameError::ActionOutOfRange {
                player: PlayerId::new(player as u8),
                action,
                num_options,
            });
        }
        Ok(Self::new(choices))
    }

    /// Decode a flat joint action index.
    pub fn from_flat(
        flat: u64,
        player_count: usize,
        num_options: usize,
    ) -> EngineResult<Self> {
        let num_joint_actions = num_flat_joint_actions(player_count, num_options);
        if flat >= num_joint_actions {
            return Err(GameError::FlatActionOutOfRange {
                action: flat,
                num_joint_actions,
            });
        }

        let radix = num_options as u64;
        let mut rest = flat;
        let mut choices = SmallVec::with_capacity(player_count);
        for _ in 0..player_count {
            choices.push((rest % radix) as Action);
            rest /= radix;
        }
        Ok(Self { choices })
    }

    /// Encode as a flat joint action index.
    #[must_use]
    pub fn to_flat(&self, num_options: usize) -> u64 {
        self.choices
            .iter()
            .rev()
            .fold(0u64, |acc, &a| acc * num_options as u64 + a as u64)
    }

    /// Number of players covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.choices.len()
    }

    /// True if no player is covered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// A player's chosen option.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Action {
        self.choices[player.index()]
    }

    /// Choices in player order.
    #[must_use]
    pub fn as_slice(&self) -> &[Action] {
        &self.choices
    }

    /// The round winner: the only player holding the lowest option index.
    ///
    /// Returns `None` when the lowest index is shared (a tie).
    ///
    /// ```
    /// use bertrand_oligopoly::core::{JointAction, PlayerId};
    ///
    /// assert_eq!(JointAction::new(&[4, 2, 7]).lowest_bidder(), Some(PlayerId::new(1)));
    /// assert_eq!(JointAction::new(&[3, 1, 1, 5]).lowest_bidder(), None);
    /// ```
    #[must_use]
    pub fn lowest_bidder(&self) -> Option<PlayerId> {
        let mut min_action = Action::MAX;
        let mut num_at_min = 0;
        let mut min_player = 0;

        for (player, &action) in self.choices.iter().enumerate() {
            if action < min_action {
                min_action = action;
                num_at_min = 1;
                min_player = player;
            } else if action == min_action {
                num_at_min += 1;
            }
        }

        (num_at_min == 1).then(|| PlayerId::new(min_player as u8))
    }
}

/// Size of the joint action space, `num_options ^ player_count`.
///
/// Saturates at `u64::MAX` (unreachable for 10 players and any practical
/// number of options).
#[must_use]
pub fn num_flat_joint_actions(player_count: usize, num_options: usize) -> u64 {
    (num_options as u64)
        .checked_pow(player_count as u32)
        .unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowest_bidder_unique() {
        let joint = JointAction::new(&[5, 3, 9]);
        assert_eq!(joint.lowest_bidder(), Some(PlayerId::new(1)));

        let joint = JointAction::new(&[0, 14]);
        assert_eq!(joint.lowest_bidder(), Some(PlayerId::new(0)));
    }

    #[test]
    fn test_lowest_bidder_tie() {
        assert_eq!(JointAction::new(&[3, 1, 1, 5]).lowest_bidder(), None);
        assert_eq!(JointAction::new(&[2, 2]).lowest_bidder(), None);
    }

    #[test]
    fn test_lowest_bidder_tie_above_unique_is_irrelevant() {
        // Shared higher prices do not matter, only the minimum.
        let joint = JointAction::new(&[7, 7, 1]);
        assert_eq!(joint.lowest_bidder(), Some(PlayerId::new(2)));
    }

    #[test]
    fn test_validated() {
        assert!(JointAction::validated(&[0, 14], 2, 15).is_ok());

        assert_eq!(
            JointAction::validated(&[0, 1, 2], 2, 15),
            Err(GameError::WrongArity { expected: 2, got: 3 })
        );
        assert_eq!(
            JointAction::validated(&[0, 15], 2, 15),
            Err(GameError::ActionOutOfRange {
                player: PlayerId::new(1),
                action: 15,
                num_options: 15,
            })
        );
    }

    #[test]
    fn test_flat_encoding_player_zero_least_significant() {
        // 3 options, 2 players: flat = a0 + 3 * a1
        let joint = JointAction::from_flat(7, 2, 3).unwrap();
        assert_eq!(joint.as_slice(), &[1, 2]);
        assert_eq!(joint.to_flat(3), 7);
    }

    #[test]
    fn test_flat_encoding_covers_space() {
        let total = num_flat_joint_actions(3, 4);
        assert_eq!(total, 64);

        for flat in 0..total {
            let joint = JointAction::from_flat(flat, 3, 4).unwrap();
            assert_eq!(joint.len(), 3);
            assert_eq!(joint.to_flat(4), flat);
        }

        assert_eq!(
            JointAction::from_flat(64, 3, 4),
            Err(GameError::FlatActionOutOfRange {
                action: 64,
                num_joint_actions: 64,
            })
        );
    }

    #[test]
    fn test_num_flat_joint_actions_large() {
        assert_eq!(num_flat_joint_actions(10, 15), 576_650_390_625);
    }
}
