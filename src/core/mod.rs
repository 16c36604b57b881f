//! Core engine types: players, configuration, errors, joint actions, RNG.
//!
//! These are the building blocks shared by the market model, the rules,
//! the observers and the playout worker.

pub mod player;
pub mod config;
pub mod error;
pub mod action;
pub mod rng;

pub use player::{PlayerId, PlayerMap};
pub use config::{GameConfig, GameParams, ParamValue, ReturnsType, MAX_PLAYERS, MIN_PLAYERS};
pub use error::{EngineResult, GameError};
pub use action::{num_flat_joint_actions, Action, JointAction};
pub use rng::GameRng;
