//! Core types: players, RNG, configuration, errors.
//!
//! These are the building blocks shared by the catalog, the matcher,
//! the ledgers and both turn coordinators.

pub mod player;
pub mod rng;
pub mod config;
pub mod error;

pub use player::{PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::GameRng;
pub use config::{DealTable, GameConfig, OpponentEffects};
pub use error::{ActionRejected, CatalogError, ConfigError, NetError};
