//! Matching engine.
//!
//! Decides which compound or reaction, if any, a card selection forms.
//! The matcher is pure: ledgers are mutated only by the effect resolver
//! and the turn coordinators, using the `CompoundMatch`/`ReactionMatch`
//! produced here.

pub mod matcher;
pub mod multiset;

pub use matcher::{
    find_compound, find_reaction, first_available_compound, special_match, CompoundMatch,
    ConsumedElements, ReactionMatch,
};
