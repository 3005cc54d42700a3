//! Error taxonomy.
//!
//! - `CatalogError`: malformed rule data, fatal at startup
//! - `ConfigError`: unusable configuration, fatal at startup
//! - `ActionRejected`: an illegal action; nothing was mutated
//! - `NetError`: a wire message could not be encoded, decoded or trusted

use thiserror::Error;

/// Malformed catalog data. A game must not start with any of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("catalog has no elements to draw from")]
    NoElements,

    #[error("element symbol '{0}' is defined more than once")]
    DuplicateElement(String),

    #[error("compound formula '{0}' is defined more than once")]
    DuplicateCompound(String),

    #[error("'{owner}' references unknown element '{symbol}'")]
    UnknownElement { owner: String, symbol: String },

    #[error("'{owner}' references unknown compound '{formula}'")]
    UnknownCompound { owner: String, formula: String },

    #[error("compound '{formula}' requires zero of element '{symbol}'")]
    ZeroQuantity { formula: String, symbol: String },

    #[error("compound '{formula}' lists element '{symbol}' twice in its requirement")]
    RepeatedRequirement { formula: String, symbol: String },

    #[error("compound '{0}' has an empty requirement")]
    EmptyRequirement(String),

    #[error("reaction '{0}' requires no compounds")]
    EmptyReaction(String),

    #[error("special rule of '{formula}' needs element '{symbol}' in the catalog")]
    MissingRuleElement { formula: String, symbol: &'static str },

    #[error("catalog holds more than {max} {kind} entries")]
    TooManyEntries { kind: &'static str, max: usize },
}

/// Invalid `GameConfig` values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("hand limit must be at least 1")]
    ZeroHandLimit,

    #[error("win condition must be at least 1 compound")]
    ZeroWinCondition,

    #[error("recovery timeout must be at least 1 tick")]
    ZeroRecoveryTimeout,
}

/// Why an action was refused. The acting ledger is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionRejected {
    #[error("it is not this player's turn")]
    NotYourTurn,

    #[error("the game is over")]
    GameOver,

    #[error("the selection is empty")]
    EmptySelection,

    #[error("the selection does not form any compound")]
    NoMatchingCompound,

    #[error("the selection does not satisfy any reaction")]
    NoMatchingReaction,

    #[error("a discard has already been made this turn")]
    AlreadyDiscarded,

    #[error("the selection contains elements not in hand")]
    NotInHand,

    #[error("the compound '{0}' is not owned")]
    CompoundNotOwned(String),

    #[error("reaction limit of {limit} reached this turn")]
    ReactionLimitReached { limit: u32 },

    #[error("compound '{0}' has no activatable effect")]
    NoEffect(String),
}

/// Wire encoding failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetError {
    #[error("failed to encode message: {0}")]
    Encode(String),

    #[error("failed to decode message: {0}")]
    Decode(String),

    #[error("message names seat {0}, which is not at the table")]
    UnknownSeat(u8),
}
