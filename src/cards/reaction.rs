//! Reactions: compounds combined into further compounds and elements.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::compound::CompoundId;
use super::element::ElementId;

/// Index of a reaction in its catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReactionId(pub u16);

/// Static reaction definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    pub id: ReactionId,
    pub name: String,

    /// Exact multiset of reactant compounds, as (compound, quantity) pairs.
    pub required: SmallVec<[(CompoundId, u8); 4]>,

    pub produced_compounds: Vec<CompoundId>,
    pub produced_elements: Vec<ElementId>,

    /// Reactant compounds leave the ledger when the reaction runs.
    pub banish_reactants: bool,

    /// The acting player's turn ends right after the reaction.
    pub forcibly_ends_turn: bool,

    /// Replaces the player's reaction limit for the rest of the turn.
    pub reaction_limit_override: Option<u32>,
}

impl std::fmt::Display for Reaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
