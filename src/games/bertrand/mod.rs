//! Bertrand oligopoly: repeated simultaneous price competition.
//!
//! Rules of one round:
//! - Every firm picks a price tier `a` in `[0, O)` at the same time
//! - The firm with the uniquely lowest tier is recorded as round winner
//!   (nothing is recorded on a tie); winning earns no points by itself
//! - Every firm earns its logit-demand profit for the round
//!
//! After `T` rounds the firms with the most accumulated profit win.
//! Supports 2-10 firms.

mod game;
mod observer;
mod state;

pub use game::BertrandGame;
pub use observer::BertrandObserver;
pub use state::{RoundState, DEFAULT_QUALITY};
