//! Random simulation of complete games.
//!
//! - **RandomPlayout**: plays uniformly random joint actions to the end
//! - **Trajectory**: what happened, round by round, plus final returns
//!
//! Playouts are deterministic for a given seed, so a failing game can be
//! replayed exactly.
//!
//! ## Usage
//!
//! ```
//! use bertrand_oligopoly::core::GameConfig;
//! use bertrand_oligopoly::games::bertrand::BertrandGame;
//! use bertrand_oligopoly::playout::{PlayoutConfig, RandomPlayout};
//!
//! let game = BertrandGame::new(GameConfig::default().with_num_turns(5)).unwrap();
//! let playout = RandomPlayout::new(game, PlayoutConfig::default());
//!
//! let trajectory = playout.play(42).unwrap();
//! assert_eq!(trajectory.len(), 5);
//! assert_eq!(trajectory, playout.play(42).unwrap());
//! ```

pub mod random;
pub mod trajectory;

pub use random::{PlayoutConfig, RandomPlayout};
pub use trajectory::{Round, Trajectory};
