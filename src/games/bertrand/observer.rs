//! Player views of a Bertrand market.
//!
//! A `BertrandObserver` is fixed to one `ObservationType` and egocentric
//! flag. Per request it resolves the disclosure mode for the game and
//! writes either a string or tensor fields into a `TensorAllocator`.

use crate::core::{EngineResult, PlayerId};
use crate::observer::{format_real, Disclosure, ObservationType, TensorAllocator, TensorFields};

use super::game::BertrandGame;
use super::state::RoundState;

/// Win sequence entry printed for a tied round.
const TIED_ROUND: &str = "-1";

/// Produces strings and tensors for one kind of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BertrandObserver {
    obs_type: ObservationType,
    egocentric: bool,
}

impl BertrandObserver {
    #[must_use]
    pub fn new(obs_type: ObservationType, egocentric: bool) -> Self {
        Self {
            obs_type,
            egocentric,
        }
    }

    #[must_use]
    pub fn obs_type(&self) -> ObservationType {
        self.obs_type
    }

    /// Whether win sequences are rotated so index 0 is the observer.
    #[must_use]
    pub fn egocentric(&self) -> bool {
        self.egocentric
    }

    /// Write the fields this view may contain, in layout order.
    pub fn write_tensor<A: TensorAllocator + ?Sized>(
        &self,
        game: &BertrandGame,
        state: &RoundState,
        player: PlayerId,
        allocator: &mut A,
    ) -> EngineResult<()> {
        game.check_player(player)?;
        let fields = TensorFields::resolve(self.obs_type, game.config().imp_info);

        if fields.point_totals {
            write_point_totals(state, player, allocator);
        }
        if fields.win_sequence {
            self.write_win_sequence(state, player, allocator);
        }
        if fields.action_sequence {
            write_action_sequence(game, state, player, allocator);
        }
        Ok(())
    }

    /// Render this view as text.
    ///
    /// The layout depends on the disclosure mode and is stable: hosts may
    /// parse it.
    pub fn string_from(
        &self,
        game: &BertrandGame,
        state: &RoundState,
        player: PlayerId,
    ) -> EngineResult<String> {
        game.check_player(player)?;

        let text = match Disclosure::resolve(self.obs_type, game.config().imp_info) {
            Disclosure::FullPrivateRecall => full_private_recall(state, player),
            Disclosure::PrivateSummary => private_summary(state),
            Disclosure::PublicOnly => public_only(state),
            Disclosure::Hidden => String::new(),
        };
        Ok(text)
    }

    /// One-hot round winner per completed round; tied rounds stay zero.
    fn write_win_sequence<A: TensorAllocator + ?Sized>(
        &self,
        state: &RoundState,
        player: PlayerId,
        allocator: &mut A,
    ) {
        let player_count = state.player_count();
        let mut out = allocator.get("win_sequence", &[state.num_turns(), player_count]);

        for (round, winner) in state.win_sequence().iter().enumerate() {
            let Some(winner) = *winner else { continue };
            let column = if self.egocentric {
                winner.relative_to(player, player_count)
            } else {
                winner.index()
            };
            out.set(&[round, column], 1.0);
        }
    }
}

/// Cumulative points, requester first.
fn write_point_totals<A: TensorAllocator + ?Sized>(
    state: &RoundState,
    player: PlayerId,
    allocator: &mut A,
) {
    let player_count = state.player_count();
    let mut out = allocator.get("point_totals", &[player_count]);

    for (slot, p) in player.rotation(player_count).enumerate() {
        out.set(&[slot], state.points()[p] as f32);
    }
}

/// One-hot own option index per completed round.
fn write_action_sequence<A: TensorAllocator + ?Sized>(
    game: &BertrandGame,
    state: &RoundState,
    player: PlayerId,
    allocator: &mut A,
) {
    let mut out = allocator.get(
        "player_action_sequence",
        &[state.num_turns(), game.config().num_options],
    );

    for (round, joint) in state.actions_history().iter().enumerate() {
        out.set(&[round, joint.get(player)], 1.0);
    }
}

fn full_private_recall(state: &RoundState, player: PlayerId) -> String {
    let mut result = String::new();
    push_action_sequence(state, player, &mut result);
    push_win_sequence(state, &mut result);
    push_points(state, &mut result);
    push_terminal(state, &mut result);
    result
}

fn private_summary(state: &RoundState) -> String {
    let mut result = String::new();
    push_points(state, &mut result);
    push_win_sequence(state, &mut result);
    result
}

fn public_only(state: &RoundState) -> String {
    let mut result = String::new();
    push_win_sequence(state, &mut result);
    push_points(state, &mut result);
    result
}

fn push_action_sequence(state: &RoundState, player: PlayerId, result: &mut String) {
    result.push_str(&format!("{} action sequence: ", player));
    for joint in state.actions_history() {
        result.push_str(&joint.get(player).to_string());
        result.push(' ');
    }
    result.push('\n');
}

fn push_win_sequence(state: &RoundState, result: &mut String) {
    result.push_str("Win sequence: ");
    for winner in state.win_sequence() {
        match winner {
            Some(p) => result.push_str(&p.index().to_string()),
            None => result.push_str(TIED_ROUND),
        }
        result.push(' ');
    }
    result.push('\n');
}

/// Points in absolute player order.
pub(crate) fn push_points(state: &RoundState, result: &mut String) {
    result.push_str("Points: ");
    for &points in state.points().as_slice() {
        result.push_str(&format_real(points));
        result.push(' ');
    }
    result.push('\n');
}

fn push_terminal(state: &RoundState, result: &mut String) {
    result.push_str("Terminal?: ");
    result.push(if state.is_terminal() { '1' } else { '0' });
    result.push('\n');
}
