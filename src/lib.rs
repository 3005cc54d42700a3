//! # compound-ccg
//!
//! Core of a two-player element/compound card game.
//!
//! Players hold hands of chemical elements, combine them into compounds,
//! combine compounds through reactions, and activate compound effects.
//! The first player to own enough compounds wins.
//!
//! ## Design Principles
//!
//! 1. **Data-Driven Catalog**: Elements, compounds and reactions are loaded
//!    from a `CatalogDefinition` and validated once. Rules never hardcode
//!    card content beyond the structural special rules.
//!
//! 2. **Ledger Invariants**: A `PlayerLedger` never exceeds its hand limit
//!    and never goes negative. Rejected actions leave it untouched.
//!
//! 3. **Fog of War**: Peers exchange `LedgerSnapshot`s only: hand size and
//!    owned compounds, never hand contents.
//!
//! ## Modules
//!
//! - `core`: Players, RNG, configuration, errors
//! - `cards`: Elements, compounds, reactions and the `Catalog`
//! - `rules`: Compound and reaction matching
//! - `ledger`: Per-player hand and compound bookkeeping
//! - `effects`: Applying matches and compound effects
//! - `turn`: Turn ownership and the game outcome
//! - `session`: Single-peer play against a simulated opponent
//! - `net`: Networked play with turn handoff and recovery
//! - `games`: Built-in catalogs

pub mod core;
pub mod cards;
pub mod rules;
pub mod ledger;
pub mod effects;
pub mod turn;
pub mod session;
pub mod net;
pub mod games;

// Re-export commonly used types
pub use crate::core::{
    ActionRejected, CatalogError, ConfigError, DealTable, GameConfig, GameRng,
    NetError, OpponentEffects, PlayerId, PlayerMap,
};

pub use crate::cards::{
    Catalog, CatalogDefinition, Compound, CompoundEffect, CompoundId, Element, ElementGroup,
    ElementId, Reaction, ReactionId, Requirement, SpecialRule,
};

pub use crate::rules::{find_compound, find_reaction, CompoundMatch, ReactionMatch};

pub use crate::ledger::{LedgerSnapshot, PlayerLedger};

pub use crate::effects::{EffectOutcome, EffectResolver, ReactionOutcome, ResolverContext};

pub use crate::turn::{GameStatus, TurnCoordinator, TurnOwner, TurnPhase, TurnToken};

pub use crate::session::{LocalGame, SimpleOpponent};

pub use crate::net::{
    MemoryRoom, MessageChannel, NetworkedGame, PeerEvent, PeerMessage, RoomStore, TurnHandoff,
};
