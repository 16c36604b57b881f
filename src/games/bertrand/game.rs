//! The Bertrand oligopoly game.

use log::{debug, trace};

use crate::core::{
    Action, EngineResult, GameConfig, GameError, GameParams, JointAction, PlayerId, ReturnsType,
    MAX_PLAYERS, MIN_PLAYERS,
};
use crate::market::{LogitDemand, PriceGrid};
use crate::observer::{format_real, ContiguousAllocator, ObservationType};
use crate::rules::{
    ChanceMode, CurrentPlayer, Dynamics, GameInfo, GameResult, Information, RulesEngine, Utility,
};

use super::observer::{push_points, BertrandObserver};
use super::state::{RoundState, DEFAULT_QUALITY};

/// Firms repeatedly pick a price tier at the same time and split a logit
/// demand market.
///
/// Holds everything derived from the configuration: the price grid, the
/// demand model, the game metadata and the four standard observers.
///
/// ## Example
///
/// ```
/// use bertrand_oligopoly::games::bertrand::BertrandGame;
/// use bertrand_oligopoly::core::GameConfig;
/// use bertrand_oligopoly::rules::RulesEngine;
///
/// let game = BertrandGame::new(GameConfig::default().with_num_turns(2)).unwrap();
/// let mut state = game.new_initial_state();
///
/// game.apply_joint_action(&mut state, &[3, 5]).unwrap();
/// game.apply_joint_action(&mut state, &[4, 4]).unwrap();
///
/// assert!(state.is_terminal());
/// assert_eq!(game.returns(&state), state.points().as_slice());
/// ```
#[derive(Clone, Debug)]
pub struct BertrandGame {
    config: GameConfig,
    grid: PriceGrid,
    demand: LogitDemand,
    info: GameInfo,
    default_observer: BertrandObserver,
    info_state_observer: BertrandObserver,
    public_observer: BertrandObserver,
    private_observer: BertrandObserver,
}

impl BertrandGame {
    /// Build a game from a configuration, validating it first.
    pub fn new(config: GameConfig) -> EngineResult<Self> {
        config.validate()?;

        let grid = PriceGrid::new(config.interval_size, config.num_options)?;
        let h = config.horizontal_differentiation;
        let utility_range = [
            (DEFAULT_QUALITY - grid.lo()) / h,
            (DEFAULT_QUALITY - grid.hi()) / h,
        ];
        if !utility_range.iter().all(|u| u.is_finite()) {
            return Err(GameError::InvalidInterval(config.interval_size));
        }
        let demand = LogitDemand::new(
            config.horizontal_differentiation,
            config.outside_good as f64,
            config.marginal_cost as f64,
        );
        let info = game_info(&config);

        let egocentric = config.egocentric;
        let game = Self {
            default_observer: BertrandObserver::new(ObservationType::DEFAULT, egocentric),
            info_state_observer: BertrandObserver::new(ObservationType::INFO_STATE, egocentric),
            public_observer: BertrandObserver::new(ObservationType::PUBLIC, egocentric),
            private_observer: BertrandObserver::new(ObservationType::PRIVATE, egocentric),
            config,
            grid,
            demand,
            info,
        };

        debug!(
            "bertrand game: {} players, {} options, {} turns, prices [{}, {}] step {}",
            game.config.players,
            game.config.num_options,
            game.config.num_turns,
            game.grid.lo(),
            game.grid.hi(),
            game.grid.step()
        );
        Ok(game)
    }

    /// Build a game from named host parameters.
    pub fn from_params(params: &GameParams) -> EngineResult<Self> {
        Self::new(GameConfig::from_params(params)?)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn price_grid(&self) -> &PriceGrid {
        &self.grid
    }

    pub fn demand(&self) -> &LogitDemand {
        &self.demand
    }

    /// Static metadata for this variant.
    pub fn info(&self) -> &GameInfo {
        &self.info
    }

    // === Game-level queries ===

    pub fn num_players(&self) -> usize {
        self.config.players
    }

    /// Longest possible game, in joint-action applications.
    pub fn max_game_length(&self) -> usize {
        self.config.num_turns
    }

    /// The game has no chance nodes.
    pub fn max_chance_outcomes(&self) -> usize {
        0
    }

    /// Lower bound on any player's return.
    pub fn min_utility(&self) -> f64 {
        match self.config.returns_type {
            ReturnsType::WinLoss => -1.0,
            ReturnsType::PointDifference => 0.0,
            ReturnsType::TotalPoints => {
                // Pricing below cost loses money every round.
                let margin = self.grid.lo() - self.demand.marginal_cost();
                if margin < 0.0 {
                    margin * self.config.num_turns as f64
                } else {
                    0.0
                }
            }
        }
    }

    /// Upper bound on any player's return.
    pub fn max_utility(&self) -> f64 {
        match self.config.returns_type {
            ReturnsType::WinLoss => 1.0,
            ReturnsType::PointDifference | ReturnsType::TotalPoints => {
                (self.grid.monopoly_price() - self.demand.marginal_cost())
                    * self.config.num_turns as f64
            }
        }
    }

    /// Constant sum of returns, if there is one.
    pub fn utility_sum(&self) -> Option<f64> {
        match self.config.returns_type {
            ReturnsType::TotalPoints => None,
            ReturnsType::WinLoss | ReturnsType::PointDifference => Some(0.0),
        }
    }

    /// Flat length `P * O`, whatever the disclosure mode.
    pub fn tensor_size(&self) -> usize {
        self.config.players * self.config.num_options
    }

    pub fn information_state_tensor_shape(&self) -> Vec<usize> {
        vec![self.tensor_size()]
    }

    pub fn observation_tensor_shape(&self) -> Vec<usize> {
        vec![self.tensor_size()]
    }

    // === Observers ===

    /// Create an observer for any view of this game.
    ///
    /// `None` picks the default observation type and the game's own
    /// egocentric flag.
    pub fn make_observer(
        &self,
        obs_type: Option<ObservationType>,
        egocentric: Option<bool>,
    ) -> BertrandObserver {
        BertrandObserver::new(
            obs_type.unwrap_or_default(),
            egocentric.unwrap_or(self.config.egocentric),
        )
    }

    pub fn default_observer(&self) -> &BertrandObserver {
        &self.default_observer
    }

    pub fn info_state_observer(&self) -> &BertrandObserver {
        &self.info_state_observer
    }

    pub fn public_observer(&self) -> &BertrandObserver {
        &self.public_observer
    }

    pub fn private_observer(&self) -> &BertrandObserver {
        &self.private_observer
    }

    // === Per-player observations ===

    pub fn information_state_string(
        &self,
        state: &RoundState,
        player: PlayerId,
    ) -> EngineResult<String> {
        self.info_state_observer.string_from(self, state, player)
    }

    pub fn observation_string(&self, state: &RoundState, player: PlayerId) -> EngineResult<String> {
        self.default_observer.string_from(self, state, player)
    }

    /// Information state tensor, exactly `P * O` floats.
    pub fn information_state_tensor(
        &self,
        state: &RoundState,
        player: PlayerId,
    ) -> EngineResult<Vec<f32>> {
        let mut values = vec![0.0; self.tensor_size()];
        self.write_information_state_tensor(state, player, &mut values)?;
        Ok(values)
    }

    /// Write the information state tensor into a caller buffer.
    ///
    /// The buffer is zeroed first. Fields beyond its end are clipped.
    pub fn write_information_state_tensor(
        &self,
        state: &RoundState,
        player: PlayerId,
        values: &mut [f32],
    ) -> EngineResult<()> {
        let mut allocator = ContiguousAllocator::new(values);
        self.info_state_observer
            .write_tensor(self, state, player, &mut allocator)
    }

    /// Observation tensor, exactly `P * O` floats.
    pub fn observation_tensor(&self, state: &RoundState, player: PlayerId) -> EngineResult<Vec<f32>> {
        let mut values = vec![0.0; self.tensor_size()];
        self.write_observation_tensor(state, player, &mut values)?;
        Ok(values)
    }

    pub fn write_observation_tensor(
        &self,
        state: &RoundState,
        player: PlayerId,
        values: &mut [f32],
    ) -> EngineResult<()> {
        let mut allocator = ContiguousAllocator::new(values);
        self.default_observer
            .write_tensor(self, state, player, &mut allocator)
    }

    /// Full state dump: last profits, (imp_info) every action history, points.
    pub fn state_to_string(&self, state: &RoundState) -> String {
        let mut result = String::new();

        for (player, &profit) in state.net_profit().iter() {
            result.push_str(&format!("{} profit: {}\n", player, format_real(profit)));
        }

        // With hidden actions the full state needs every firm's history.
        if self.config.imp_info {
            for player in PlayerId::all(state.player_count()) {
                result.push_str(&format!("{} actions: ", player));
                for joint in state.actions_history() {
                    result.push_str(&joint.get(player).to_string());
                    result.push(' ');
                }
                result.push('\n');
            }
        }

        result.push('\n');
        push_points(state, &mut result);
        result
    }

    // === Market helpers ===

    /// Real prices for a joint action.
    pub fn round_prices(&self, actions: &[Action]) -> Vec<f64> {
        actions.iter().map(|&a| self.grid.price(a)).collect()
    }

    /// Net profit of every firm for a joint action, given firm qualities.
    pub fn round_profits(&self, actions: &[Action], quality: &[f64]) -> Vec<f64> {
        self.demand.profits(&self.round_prices(actions), quality)
    }

    /// Check a player index against the player count.
    pub(crate) fn check_player(&self, player: PlayerId) -> EngineResult<()> {
        if player.index() < self.config.players {
            Ok(())
        } else {
            Err(GameError::InvalidPlayer {
                player,
                player_count: self.config.players,
            })
        }
    }
}

fn game_info(config: &GameConfig) -> GameInfo {
    GameInfo {
        short_name: "bertrand_oligopoly",
        long_name: "Bertrand Oligopoly",
        dynamics: Dynamics::Simultaneous,
        chance_mode: ChanceMode::Deterministic,
        information: if config.imp_info {
            Information::ImperfectInformation
        } else {
            Information::PerfectInformation
        },
        utility: match config.returns_type {
            ReturnsType::TotalPoints => Utility::GeneralSum,
            ReturnsType::WinLoss | ReturnsType::PointDifference => Utility::ZeroSum,
        },
        min_players: MIN_PLAYERS,
        max_players: MAX_PLAYERS,
        provides_information_state_string: true,
        provides_information_state_tensor: true,
        provides_observation_string: true,
        provides_observation_tensor: true,
    }
}

impl RulesEngine for BertrandGame {
    type State = RoundState;

    fn player_count(&self) -> usize {
        self.config.players
    }

    fn num_distinct_actions(&self) -> usize {
        self.config.num_options
    }

    fn new_initial_state(&self) -> RoundState {
        RoundState::new(self.config.players, self.config.num_turns)
    }

    fn current_player(&self, state: &RoundState) -> CurrentPlayer {
        if state.is_terminal() {
            CurrentPlayer::Terminal
        } else {
            CurrentPlayer::Simultaneous
        }
    }

    fn legal_actions(&self, state: &RoundState, player: PlayerId) -> EngineResult<Vec<Action>> {
        self.check_player(player)?;
        if state.is_terminal() {
            return Ok(Vec::new());
        }
        Ok((0..self.config.num_options).collect())
    }

    fn apply_joint_action(&self, state: &mut RoundState, actions: &[Action]) -> EngineResult<()> {
        if state.is_terminal() {
            return Err(GameError::GameOver);
        }
        let joint = JointAction::validated(actions, self.config.players, self.config.num_options)?;

        // The round winner is recorded but earns nothing by itself.
        let profits =
            self.round_profits(joint.as_slice(), state.vertical_differentiation().as_slice());
        trace!(
            "round {}: actions {:?} winner {:?} profits {:?}",
            state.current_turn(),
            joint.as_slice(),
            joint.lowest_bidder(),
            profits
        );

        state.record_round(joint, &profits);

        if state.is_terminal() {
            debug!(
                "game over after {} rounds, winners {:?}, points {:?}",
                state.current_turn(),
                state.winners(),
                state.points().as_slice()
            );
        }
        Ok(())
    }

    fn is_terminal(&self, state: &RoundState) -> Option<GameResult> {
        state
            .is_terminal()
            .then(|| GameResult::from_winners(state.winners(), state.player_count()))
    }

    fn returns(&self, state: &RoundState) -> Vec<f64> {
        let player_count = state.player_count();
        if !state.is_terminal() {
            return vec![0.0; player_count];
        }

        let points = state.points().as_slice();
        match self.config.returns_type {
            ReturnsType::WinLoss => {
                let winners = state.winners();
                if winners.len() == player_count {
                    return vec![0.0; player_count];
                }
                let num_winners = winners.len() as f64;
                let num_losers = (player_count - winners.len()) as f64;

                let mut returns = vec![-1.0 / num_losers; player_count];
                for winner in winners {
                    returns[winner.index()] = 1.0 / num_winners;
                }
                returns
            }
            ReturnsType::PointDifference => {
                let mean = points.iter().sum::<f64>() / player_count as f64;
                points.iter().map(|p| p - mean).collect()
            }
            ReturnsType::TotalPoints => points.to_vec(),
        }
    }

    fn rewards(&self, state: &RoundState) -> Vec<f64> {
        state.net_profit().as_slice().to_vec()
    }

    fn action_to_string(&self, player: PlayerId, action: Action) -> EngineResult<String> {
        self.check_player(player)?;
        if action >= self.config.num_options {
            return Err(GameError::ActionOutOfRange {
                player,
                action,
                num_options: self.config.num_options,
            });
        }
        Ok(format!("[{}]: {}", player, action + 1))
    }

    fn check_invariants(&self, state: &RoundState) -> EngineResult<()> {
        if state.player_count() != self.config.players || state.num_turns() != self.config.num_turns {
            return Err(GameError::CorruptState(format!(
                "state has {} players and {} turns, game has {} and {}",
                state.player_count(),
                state.num_turns(),
                self.config.players,
                self.config.num_turns
            )));
        }
        if let Some(reason) = state.invariant_violation() {
            return Err(GameError::CorruptState(reason));
        }
        let out_of_range = state
            .actions_history()
            .iter()
            .position(|joint| joint.as_slice().iter().any(|&a| a >= self.config.num_options));
        if let Some(round) = out_of_range {
            return Err(GameError::CorruptState(format!(
                "round {} holds an option outside [0, {})",
                round, self.config.num_options
            )));
        }
        Ok(())
    }
}
