//! Per-game mutable state.
//!
//! A `RoundState` is created by `BertrandGame::new_initial_state` and only
//! ever mutated by joint-action application. Histories live in `im`
//! persistent vectors, so cloning a state for a search branch is O(1).

use im::Vector;

use crate::core::{JointAction, PlayerId, PlayerMap};

/// Quality constant given to every firm (no vertical differentiation).
pub const DEFAULT_QUALITY: f64 = 2.0;

/// State of one game in progress.
///
/// Invariant: `actions_history.len() == win_sequence.len() == current_turn`.
#[derive(Clone, Debug)]
pub struct RoundState {
    player_count: usize,
    num_turns: usize,
    current_turn: usize,

    /// Cumulative profit per firm (real-valued).
    points: PlayerMap<f64>,

    /// Profit of the most recent round, for display.
    net_profit: PlayerMap<f64>,

    /// Quality constant per firm.
    vertical_differentiation: PlayerMap<f64>,

    actions_history: Vector<JointAction>,

    /// Lowest bidder per round, `None` on ties.
    win_sequence: Vector<Option<PlayerId>>,

    /// Top scorers, filled once the game ends.
    winners: Vec<PlayerId>,
}

impl RoundState {
    /// Fresh state at turn 0.
    #[must_use]
    pub fn new(player_count: usize, num_turns: usize) -> Self {
        Self {
            player_count,
            num_turns,
            current_turn: 0,
            points: PlayerMap::with_value(player_count, 0.0),
            net_profit: PlayerMap::with_value(player_count, 0.0),
            vertical_differentiation: PlayerMap::with_value(player_count, DEFAULT_QUALITY),
            actions_history: Vector::new(),
            win_sequence: Vector::new(),
            winners: Vec::new(),
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    #[must_use]
    pub fn num_turns(&self) -> usize {
        self.num_turns
    }

    /// Number of completed rounds.
    #[must_use]
    pub fn current_turn(&self) -> usize {
        self.current_turn
    }

    /// True once every round has been played.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.current_turn == self.num_turns
    }

    #[must_use]
    pub fn points(&self) -> &PlayerMap<f64> {
        &self.points
    }

    #[must_use]
    pub fn net_profit(&self) -> &PlayerMap<f64> {
        &self.net_profit
    }

    #[must_use]
    pub fn vertical_differentiation(&self) -> &PlayerMap<f64> {
        &self.vertical_differentiation
    }

    /// Joint actions of every completed round, oldest first.
    #[must_use]
    pub fn actions_history(&self) -> &Vector<JointAction> {
        &self.actions_history
    }

    /// Round winners of every completed round, oldest first.
    #[must_use]
    pub fn win_sequence(&self) -> &Vector<Option<PlayerId>> {
        &self.win_sequence
    }

    /// Top scorers of a finished game; empty while the game runs.
    #[must_use]
    pub fn winners(&self) -> &[PlayerId] {
        &self.winners
    }

    /// Record a completed round and advance the turn counter.
    ///
    /// `profits` holds this round's net profit per player. Once the last
    /// round is recorded the winner set is computed.
    pub(crate) fn record_round(&mut self, joint: JointAction, profits: &[f64]) {
        debug_assert!(!self.is_terminal());
        debug_assert_eq!(joint.len(), self.player_count);
        debug_assert_eq!(profits.len(), self.player_count);

        for (player, &profit) in PlayerId::all(self.player_count).zip(profits) {
            self.net_profit[player] = profit;
            self.points[player] += profit;
        }

        self.win_sequence.push_back(joint.lowest_bidder());
        self.actions_history.push_back(joint);
        self.current_turn += 1;

        if self.is_terminal() {
            self.winners = top_scorers(&self.points);
        }
    }

    /// First broken structural invariant, if any.
    ///
    /// Checks that the histories track the turn counter, that the turn
    /// counter stays within the game and that winners exist exactly when
    /// the game is over.
    #[must_use]
    pub fn invariant_violation(&self) -> Option<String> {
        if self.actions_history.len() != self.current_turn
            || self.win_sequence.len() != self.current_turn
        {
            return Some(format!(
                "{} joint actions and {} round winners recorded at turn {}",
                self.actions_history.len(),
                self.win_sequence.len(),
                self.current_turn
            ));
        }
        if self.current_turn > self.num_turns {
            return Some(format!(
                "turn {} is past the last turn {}",
                self.current_turn, self.num_turns
            ));
        }
        if self.winners.is_empty() == self.is_terminal() {
            return Some(format!(
                "{} winners at turn {} of {}",
                self.winners.len(),
                self.current_turn,
                self.num_turns
            ));
        }
        if let Some(round) = self
            .actions_history
            .iter()
            .position(|joint| joint.len() != self.player_count)
        {
            return Some(format!("round {} does not hold one action per player", round));
        }
        None
    }
}

/// Players whose points equal the maximum.
///
/// Exact float equality: two firms only share the win when their
/// accumulated points are bit-identical.
fn top_scorers(points: &PlayerMap<f64>) -> Vec<PlayerId> {
    let max_points = points
        .as_slice()
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);

    points
        .iter()
        .filter(|&(_, &p)| p == max_points)
        .map(|(player, _)| player)
        .collect()
}
