//! Static game metadata.
//!
//! Hosts use `GameInfo` to decide how to drive a game (simultaneous or
//! sequential, deterministic or not) and which observations it provides.

/// How players move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dynamics {
    Simultaneous,
    Sequential,
}

/// Whether the game has chance nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChanceMode {
    Deterministic,
    ExplicitStochastic,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Information {
    PerfectInformation,
    ImperfectInformation,
}

/// Relationship between the players' returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Utility {
    /// Returns always sum to zero.
    ZeroSum,
    /// No constraint on the sum of returns.
    GeneralSum,
}

/// Description of a game variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameInfo {
    pub short_name: &'static str,
    pub long_name: &'static str,
    pub dynamics: Dynamics,
    pub chance_mode: ChanceMode,
    pub information: Information,
    pub utility: Utility,
    pub min_players: usize,
    pub max_players: usize,
    pub provides_information_state_string: bool,
    pub provides_information_state_tensor: bool,
    pub provides_observation_string: bool,
    pub provides_observation_tensor: bool,
}

impl GameInfo {
    /// Check if a player count is supported.
    #[must_use]
    pub fn supports_players(&self, player_count: usize) -> bool {
        (self.min_players..=self.max_players).contains(&player_count)
    }
}
