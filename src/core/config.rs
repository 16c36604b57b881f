//! Game configuration types.
//!
//! The host framework hands the game a set of named, typed values
//! (`GameParams`). They are validated once into an immutable `GameConfig`:
//! - `ReturnsType`: how terminal utilities are defined
//! - `ParamValue`: one typed host value
//! - `GameConfig`: every recognized option, with documented defaults

use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::error::{EngineResult, GameError};

/// Fewest firms in a market.
pub const MIN_PLAYERS: usize = 2;

/// Most firms in a market.
pub const MAX_PLAYERS: usize = 10;

/// How terminal returns are computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnsType {
    /// 1 split among the top scorers, -1 split among everyone else.
    WinLoss,
    /// Points minus the mean points over all players.
    PointDifference,
    /// Raw cumulative points.
    #[default]
    TotalPoints,
}

impl ReturnsType {
    /// Host-facing parameter string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ReturnsType::WinLoss => "win_loss",
            ReturnsType::PointDifference => "point_difference",
            ReturnsType::TotalPoints => "total_points",
        }
    }
}

impl FromStr for ReturnsType {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "win_loss" => Ok(ReturnsType::WinLoss),
            "point_difference" => Ok(ReturnsType::PointDifference),
            "total_points" => Ok(ReturnsType::TotalPoints),
            other => Err(GameError::UnknownReturnsType(other.to_string())),
        }
    }
}

impl fmt::Display for ReturnsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One typed value supplied by the host.
///
/// Untagged so that a JSON object such as
/// `{"players": 3, "imp_info": true, "returns_type": "win_loss"}`
/// deserializes straight into `GameParams`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Double(f64),
    Str(String),
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Double(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Str(v.to_string())
    }
}

/// Named host parameters.
pub type GameParams = FxHashMap<String, ParamValue>;

/// Complete game configuration.
///
/// Immutable once validated. Use `GameConfig::default()` plus the `with_*`
/// builders, or `GameConfig::from_params` for host-supplied values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of price tiers `O` (> 1).
    pub num_options: usize,

    /// Number of rounds `T` (>= 1).
    pub num_turns: usize,

    /// Extension of the price interval beyond [nash, monopoly], as a
    /// fraction of `monopoly - nash`.
    pub interval_size: f64,

    /// Unit cost.
    pub marginal_cost: i64,

    /// How interchangeable the products are (> 0).
    pub horizontal_differentiation: f64,

    /// Utility level of not buying at all.
    pub outside_good: i64,

    /// Number of firms `P` (2..=10).
    pub players: usize,

    /// Terminal returns policy.
    pub returns_type: ReturnsType,

    /// Imperfect-information disclosure (win sequence and own actions).
    pub imp_info: bool,

    /// Rotate identity-revealing fields so index 0 is the observer.
    pub egocentric: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            num_options: 15,
            num_turns: 100,
            interval_size: 0.1,
            marginal_cost: 1,
            horizontal_differentiation: 0.25,
            outside_good: 0,
            players: 2,
            returns_type: ReturnsType::TotalPoints,
            imp_info: false,
            egocentric: false,
        }
    }
}

impl GameConfig {
    /// Build a validated configuration from host parameters.
    ///
    /// Missing names keep their defaults. Unknown names and wrongly typed
    /// values are rejected.
    pub fn from_params(params: &GameParams) -> EngineResult<Self> {
        let mut config = Self::default();

        for (name, value) in params {
            match name.as_str() {
                "imp_info" => config.imp_info = expect_bool(name, value)?,
                "egocentric" => config.egocentric = expect_bool(name, value)?,
                "num_options" => config.num_options = expect_count(name, value)?,
                "interval_size" => config.interval_size = expect_double(name, value)?,
                "marginal_cost" => config.marginal_cost = expect_int(name, value)?,
                "horizontal_differentiation" => {
                    config.horizontal_differentiation = expect_double(name, value)?
                }
                "outside_good" => config.outside_good = expect_int(name, value)?,
                "num_turns" => config.num_turns = expect_count(name, value)?,
                "players" => config.players = expect_count(name, value)?,
                "returns_type" => {
                    config.returns_type = match value {
                        ParamValue::Str(s) => s.parse()?,
                        _ => return Err(type_error(name, "string")),
                    }
                }
                _ => return Err(GameError::UnknownParameter(name.clone())),
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Check every constraint the engine relies on.
    pub fn validate(&self) -> EngineResult<()> {
        if self.num_options <= 1 {
            return Err(GameError::TooFewOptions(self.num_options));
        }
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.players) {
            return Err(GameError::PlayerCountOutOfRange(self.players));
        }
        if !(self.horizontal_differentiation.is_finite() && self.horizontal_differentiation > 0.0) {
            return Err(GameError::NonPositiveDifferentiation(
                self.horizontal_differentiation,
            ));
        }
        if !self.interval_size.is_finite() {
            return Err(GameError::InvalidInterval(self.interval_size));
        }
        if self.num_turns == 0 {
            return Err(GameError::NoTurns);
        }
        Ok(())
    }

    /// Set the number of price tiers.
    #[must_use]
    pub fn with_num_options(mut self, num_options: usize) -> Self {
        self.num_options = num_options;
        self
    }

    /// Set the number of rounds.
    #[must_use]
    pub fn with_num_turns(mut self, num_turns: usize) -> Self {
        self.num_turns = num_turns;
        self
    }

    /// Set the interval extension factor.
    #[must_use]
    pub fn with_interval_size(mut self, interval_size: f64) -> Self {
        self.interval_size = interval_size;
        self
    }

    /// Set the unit cost.
    #[must_use]
    pub fn with_marginal_cost(mut self, marginal_cost: i64) -> Self {
        self.marginal_cost = marginal_cost;
        self
    }

    /// Set the horizontal differentiation coefficient.
    #[must_use]
    pub fn with_horizontal_differentiation(mut self, h: f64) -> Self {
        self.horizontal_differentiation = h;
        self
    }

    /// Set the outside good utility.
    #[must_use]
    pub fn with_outside_good(mut self, outside_good: i64) -> Self {
        self.outside_good = outside_good;
        self
    }

    /// Set the number of firms.
    #[must_use]
    pub fn with_players(mut self, players: usize) -> Self {
        self.players = players;
        self
    }

    /// Set the returns policy.
    #[must_use]
    pub fn with_returns_type(mut self, returns_type: ReturnsType) -> Self {
        self.returns_type = returns_type;
        self
    }

    /// Enable or disable imperfect-information disclosure.
    #[must_use]
    pub fn with_imp_info(mut self, imp_info: bool) -> Self {
        self.imp_info = imp_info;
        self
    }

    /// Enable or disable egocentric encoding.
    #[must_use]
    pub fn with_egocentric(mut self, egocentric: bool) -> Self {
        self.egocentric = egocentric;
        self
    }
}

fn type_error(name: &str, expected: &'static str) -> GameError {
    GameError::ParameterType {
        name: name.to_string(),
        expected,
    }
}

fn expect_bool(name: &str, value: &ParamValue) -> EngineResult<bool> {
    match value {
        ParamValue::Bool(b) => Ok(*b),
        _ => Err(type_error(name, "bool")),
    }
}

fn expect_int(name: &str, value: &ParamValue) -> EngineResult<i64> {
    match value {
        ParamValue::Int(i) => Ok(*i),
        _ => Err(type_error(name, "int")),
    }
}

fn expect_count(name: &str, value: &ParamValue) -> EngineResult<usize> {
    let raw = expect_int(name, value)?;
    usize::try_from(raw).map_err(|_| type_error(name, "non-negative int"))
}

// Ints are accepted where a double is expected.
fn expect_double(name: &str, value: &ParamValue) -> EngineResult<f64> {
    match value {
        ParamValue::Double(d) => Ok(*d),
        ParamValue::Int(i) => Ok(*i as f64),
        _ => Err(type_error(name, "double")),
    }
}
