//! Engine error taxonomy.
//!
//! Three classes of failure exist:
//! - configuration errors, raised while building a game
//! - action errors, raised by joint-action application
//! - player errors, raised by per-player queries with a bad player index
//!
//! None of them are retryable; they all indicate caller misuse.

use std::fmt;

use super::player::PlayerId;

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, GameError>;

/// Errors reported by configuration, transitions and queries.
#[derive(Clone, Debug, PartialEq)]
pub enum GameError {
    /// `returns_type` is not one of `win_loss`, `point_difference`, `total_points`.
    UnknownReturnsType(String),

    /// `num_options` must be greater than 1.
    TooFewOptions(usize),

    /// `players` must lie in 2..=10.
    PlayerCountOutOfRange(usize),

    /// `horizontal_differentiation` must be finite and strictly positive.
    NonPositiveDifferentiation(f64),

    /// `interval_size` must give a finite price grid with finite utilities.
    InvalidInterval(f64),

    /// `num_turns` must be at least 1.
    NoTurns,

    /// A parameter name the game does not recognize.
    UnknownParameter(String),

    /// A parameter of the wrong type.
    ParameterType {
        name: String,
        expected: &'static str,
    },

    /// Joint action with the wrong number of entries.
    WrongArity { expected: usize, got: usize },

    /// A player's chosen option lies outside `[0, num_options)`.
    ActionOutOfRange {
        player: PlayerId,
        action: usize,
        num_options: usize,
    },

    /// An action was applied to a finished game.
    GameOver,

    /// Player index outside `[0, player_count)`.
    InvalidPlayer { player: PlayerId, player_count: usize },

    /// A state that breaks the game's structural invariants.
    CorruptState(String),

    /// Flat joint action index outside `[0, num_joint_actions)`.
    FlatActionOutOfRange { action: u64, num_joint_actions: u64 },
}

impl GameError {
    /// True for errors raised while building a game.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            GameError::UnknownReturnsType(_)
                | GameError::TooFewOptions(_)
                | GameError::PlayerCountOutOfRange(_)
                | GameError::NonPositiveDifferentiation(_)
                | GameError::InvalidInterval(_)
                | GameError::NoTurns
                | GameError::UnknownParameter(_)
                | GameError::ParameterType { .. }
        )
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::UnknownReturnsType(name) => {
                write!(f, "Unrecognized returns_type parameter: {}", name)
            }
            GameError::TooFewOptions(n) => {
                write!(f, "num_options must be greater than 1, got {}", n)
            }
            GameError::PlayerCountOutOfRange(n) => {
                write!(f, "players must be between 2 and 10, got {}", n)
            }
            GameError::NonPositiveDifferentiation(h) => {
                write!(f, "horizontal_differentiation must be positive, got {}", h)
            }
            GameError::InvalidInterval(size) => {
                write!(f, "interval_size {} does not give a finite price grid", size)
            }
            GameError::NoTurns => write!(f, "num_turns must be at least 1"),
            GameError::UnknownParameter(name) => write!(f, "Unknown parameter: {}", name),
            GameError::ParameterType { name, expected } => {
                write!(f, "Parameter {} must be of type {}", name, expected)
            }
            GameError::WrongArity { expected, got } => {
                write!(f, "Expected {} actions (one per player), got {}", expected, got)
            }
            GameError::ActionOutOfRange {
                player,
                action,
                num_options,
            } => write!(
                f,
                "Action {} of {} is outside [0, {})",
                action, player, num_options
            ),
            GameError::GameOver => write!(f, "Game is over, no further actions are legal"),
            GameError::InvalidPlayer {
                player,
                player_count,
            } => write!(f, "{} is not a player of a {}-player game", player, player_count),
            GameError::CorruptState(reason) => write!(f, "Corrupt state: {}", reason),
            GameError::FlatActionOutOfRange {
                action,
                num_joint_actions,
            } => write!(
                f,
                "Flat joint action {} is outside [0, {})",
                action, num_joint_actions
            ),
        }
    }
}

impl std::error::Error for GameError {}
