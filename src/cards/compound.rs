//! Compound cards.
//!
//! A compound is either built from an exact multiset of elements or
//! recognised by one of the structural `SpecialRule`s. Owning a compound
//! grants its `CompoundEffect`, which is activated from the ledger.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::element::ElementId;

/// Index of a compound in its catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CompoundId(pub u16);

impl CompoundId {
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CompoundId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Compound({})", self.0)
    }
}

/// Structural rules that replace exact matching.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialRule {
    /// Three positive metals sharing one oxidation number.
    Metallic,
    /// One positive metal and one hydrogen.
    MetalHydride,
    /// One carbon and four hydrogen.
    Hydrocarbon,
    /// Four carbon.
    NetworkSolid,
    /// One positive metal and one oxygen.
    MetalOxide,
}

/// (element, quantity) pairs; quantities are at least 1 and elements distinct.
pub type ElementCounts = SmallVec<[(ElementId, u8); 4]>;

/// What a selection must look like to form a compound.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Requirement {
    Exact(ElementCounts),
    Special(SpecialRule),
}

/// Effect granted by owning a compound.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompoundEffect {
    /// No activatable effect.
    #[default]
    None,
    /// Draw N random elements.
    DrawElements(u32),
    /// The opponent's next turn is skipped.
    SkipOpponentTurn,
    /// The opponent discards N elements.
    ForceOpponentDiscard(u32),
    /// Receive N copies of a specific element.
    ReceiveElements { element: ElementId, count: u32 },
    /// Shield the next dissolution aimed at this player's compounds.
    NegateNextDissolution,
    /// Exchange hands with the opponent.
    SwapHands,
    /// Discard up to N elements from the front of the hand and redraw as many.
    DiscardAndRedraw(u32),
    /// Destroy up to N of the opponent's compounds.
    DissolveOpponentCompounds(u32),
}

impl CompoundEffect {
    /// Whether this effect mutates the opponent's ledger.
    #[must_use]
    pub const fn targets_opponent(self) -> bool {
        matches!(
            self,
            CompoundEffect::SkipOpponentTurn
                | CompoundEffect::ForceOpponentDiscard(_)
                | CompoundEffect::SwapHands
                | CompoundEffect::DissolveOpponentCompounds(_)
        )
    }
}

/// Static compound definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compound {
    pub id: CompoundId,
    pub formula: String,
    pub name: String,
    pub requirement: Requirement,
    pub effect: CompoundEffect,
    /// Once-per-turn compounds are consumed when their effect is activated.
    pub once_per_turn: bool,
}

impl Compound {
    #[must_use]
    pub fn special_rule(&self) -> Option<SpecialRule> {
        match self.requirement {
            Requirement::Special(rule) => Some(rule),
            Requirement::Exact(_) => None,
        }
    }
}

impl std::fmt::Display for Compound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.formula)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn test_opponent_targeting() {
        assert!(CompoundEffect::SwapHands.targets_opponent());
        assert!(CompoundEffect::ForceOpponentDiscard(2).targets_opponent());
        assert!(CompoundEffect::DissolveOpponentCompounds(1).targets_opponent());
        assert!(!CompoundEffect::DrawElements(2).targets_opponent());
        assert!(!CompoundEffect::NegateNextDissolution.targets_opponent());
    }

    #[test]
    fn test_special_rule_accessor() {
        let water = Compound {
            id: CompoundId::new(0),
            formula: "H2O".into(),
            name: "Water".into(),
            requirement: Requirement::Exact(smallvec![
                (ElementId::new(0), 2),
                (ElementId::new(1), 1)
            ]),
            effect: CompoundEffect::DrawElements(1),
            once_per_turn: true,
        };
        assert_eq!(water.special_rule(), None);
        assert_eq!(water.to_string(), "Water (H2O)");

        let metallic = Compound {
            requirement: Requirement::Special(SpecialRule::Metallic),
            ..water
        };
        assert_eq!(metallic.special_rule(), Some(SpecialRule::Metallic));
    }
}
