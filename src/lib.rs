//! # bertrand-oligopoly
//!
//! A repeated Bertrand price-competition game engine for RL and game-theory
//! experiments.
//!
//! ## Design Principles
//!
//! 1. **N-Player First**: Every API takes `player_count` as context.
//!    Markets have 2-10 firms; nothing assumes a duopoly.
//!
//! 2. **Simultaneous Moves**: All firms choose a price tier each round. A
//!    round is one joint action, optionally addressed by a flat index.
//!
//! 3. **Controlled Disclosure**: Observers produce strings and fixed-size
//!    tensors holding exactly what a player may see, optionally rotated so
//!    index 0 always means "me".
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) state cloning via `im-rs`, so
//!   search and playouts can branch cheaply.
//!
//! - **Logit Demand**: Per-round profits follow a multinomial-logit market
//!   with an outside good, computed overflow-safe.
//!
//! ## Modules
//!
//! - `core`: Players, configuration, errors, joint actions, RNG
//! - `market`: Price grid and logit demand
//! - `rules`: RulesEngine trait and game metadata
//! - `games`: The Bertrand oligopoly game
//! - `observer`: Observation types, tensor allocators, string formatting
//! - `playout`: Seeded random playouts

pub mod core;
pub mod market;
pub mod rules;
pub mod games;
pub mod observer;
pub mod playout;

// Re-export commonly used types
pub use crate::core::{
    Action, EngineResult, GameConfig, GameError, GameParams, GameRng, JointAction, ParamValue,
    PlayerId, PlayerMap, ReturnsType,
};

pub use crate::market::{LogitDemand, PriceGrid, MONOPOLY_PRICE, NASH_PRICE};

pub use crate::rules::{CurrentPlayer, GameInfo, GameResult, RulesEngine};

pub use crate::games::bertrand::{BertrandGame, BertrandObserver, RoundState};

pub use crate::observer::{
    ContiguousAllocator, Disclosure, FieldAllocator, ObservationType, PrivateInfo,
    TensorAllocator, TensorView,
};

pub use crate::playout::{PlayoutConfig, RandomPlayout, Trajectory};
