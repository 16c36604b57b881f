//! Rules engine trait for game implementations.
//!
//! Games implement `RulesEngine` to define:
//! - Legal actions for each player
//! - How a simultaneous joint action modifies state
//! - Win/loss conditions and returns
//!
//! Hosts (playout workers, search) only talk to games through this trait.
//! `GameInfo` carries the static metadata a host needs before it starts.

pub mod engine;
pub mod game_type;

pub use engine::{CurrentPlayer, GameResult, RulesEngine};
pub use game_type::{ChanceMode, Dynamics, GameInfo, Information, Utility};
