//! Effect resolution.
//!
//! The matcher decides *what* a selection means; the resolver applies it:
//! - `apply_compound_creation`: consume elements, add the compound
//! - `apply_reaction`: banish reactants, add products, count the reaction
//! - `apply_compound_effect`: run an owned compound's effect
//!
//! Opponent-targeting effects go through `ResolverContext::opponent_effects`,
//! which decides whether the opponent ledger is touched at all.

mod resolver;

pub use resolver::{EffectOutcome, EffectResolver, ReactionOutcome, ResolverContext};
