//! Game configuration.
//!
//! A `GameConfig` is handed to the session at startup and never changes
//! during a game. It carries the resource limits, the turn-start deal
//! table and the timing knobs used by the turn coordinators.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Turn-start deal-in rule, tiered by current hand size.
///
/// | hand size | elements added |
/// |---|---|
/// | 0 | `empty` |
/// | 1..=`small_hand_max` | `small` |
/// | above | `large` |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealTable {
    pub empty: usize,
    pub small: usize,
    pub small_hand_max: usize,
    pub large: usize,
}

impl DealTable {
    /// The table used by networked play, applied in every mode.
    pub const STANDARD: DealTable = DealTable {
        empty: 5,
        small: 4,
        small_hand_max: 5,
        large: 3,
    };

    /// Number of elements to add for a hand of `hand_size` (before capping).
    #[must_use]
    pub fn elements_for(&self, hand_size: usize) -> usize {
        match hand_size {
            0 => self.empty,
            n if n <= self.small_hand_max => self.small,
            _ => self.large,
        }
    }
}

impl Default for DealTable {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Who an opponent-targeting compound effect mutates.
///
/// `ActorOnly` leaves the opponent ledger untouched and reports the effect
/// as unapplied. `Apply` mutates the opponent ledger; it is only honoured
/// where both ledgers live in the same process.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpponentEffects {
    #[default]
    ActorOnly,
    Apply,
}

/// Complete game configuration.
///
/// ## Example
///
/// ```
/// use compound_ccg::core::{GameConfig, OpponentEffects};
///
/// let config = GameConfig::new()
///     .with_hand_limit(12)
///     .with_win_condition(5)
///     .with_opponent_effects(OpponentEffects::Apply);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.hand_limit, 12);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Maximum number of elements in a hand.
    pub hand_limit: usize,

    /// Number of owned compounds that wins the game.
    pub win_condition: usize,

    /// Turn-start deal table.
    pub deal_table: DealTable,

    /// Target policy for opponent-targeting compound effects.
    pub opponent_effects: OpponentEffects,

    /// Ticks a peer waits for a handoff to show up in the room store
    /// before running recovery.
    pub recovery_timeout_ticks: u32,

    /// Ticks the simulated opponent "thinks" before acting (single-peer).
    pub opponent_think_ticks: u32,

    /// RNG seed.
    pub seed: u64,
}

impl GameConfig {
    /// Create a configuration with the default limits.
    #[must_use]
    pub fn new() -> Self {
        Self {
            hand_limit: 10,
            win_condition: 8,
            deal_table: DealTable::STANDARD,
            opponent_effects: OpponentEffects::ActorOnly,
            recovery_timeout_ticks: 30,
            opponent_think_ticks: 0,
            seed: 0,
        }
    }

    #[must_use]
    pub fn with_hand_limit(mut self, limit: usize) -> Self {
        self.hand_limit = limit;
        self
    }

    #[must_use]
    pub fn with_win_condition(mut self, compounds: usize) -> Self {
        self.win_condition = compounds;
        self
    }

    #[must_use]
    pub fn with_deal_table(mut self, table: DealTable) -> Self {
        self.deal_table = table;
        self
    }

    #[must_use]
    pub fn with_opponent_effects(mut self, policy: OpponentEffects) -> Self {
        self.opponent_effects = policy;
        self
    }

    #[must_use]
    pub fn with_recovery_timeout(mut self, ticks: u32) -> Self {
        self.recovery_timeout_ticks = ticks;
        self
    }

    #[must_use]
    pub fn with_opponent_think_ticks(mut self, ticks: u32) -> Self {
        self.opponent_think_ticks = ticks;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check the limits are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hand_limit == 0 {
            return Err(ConfigError::ZeroHandLimit);
        }
        if self.win_condition == 0 {
            return Err(ConfigError::ZeroWinCondition);
        }
        if self.recovery_timeout_ticks == 0 {
            return Err(ConfigError::ZeroRecoveryTimeout);
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
