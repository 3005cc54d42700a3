//! Element cards.
//!
//! An `Element` is a card *type*: hands hold many copies of the same
//! element, and all of them refer to one catalog entry by `ElementId`.

use serde::{Deserialize, Serialize};

/// Index of an element in its catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub u16);

impl ElementId {
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Element({})", self.0)
    }
}

/// Fixed periodic-table classification. `is_metal` derives from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementGroup {
    AlkaliMetal,
    AlkalineEarthMetal,
    TransitionMetal,
    PostTransitionMetal,
    Metalloid,
    Nonmetal,
    Halogen,
    NobleGas,
}

impl ElementGroup {
    #[must_use]
    pub const fn is_metal(self) -> bool {
        matches!(
            self,
            ElementGroup::AlkaliMetal
                | ElementGroup::AlkalineEarthMetal
                | ElementGroup::TransitionMetal
                | ElementGroup::PostTransitionMetal
        )
    }
}

/// Static element definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub symbol: String,
    pub name: String,
    pub oxidation_number: i8,
    pub group: ElementGroup,
}

impl Element {
    #[must_use]
    pub fn is_metal(&self) -> bool {
        self.group.is_metal()
    }

    /// Metal with a positive oxidation number. The metal-based special
    /// rules only ever consider these.
    #[must_use]
    pub fn is_positive_metal(&self) -> bool {
        self.is_metal() && self.oxidation_number > 0
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{:+}", self.symbol, self.oxidation_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(symbol: &str, oxidation_number: i8, group: ElementGroup) -> Element {
        Element {
            id: ElementId::new(0),
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            oxidation_number,
            group,
        }
    }

    #[test]
    fn test_metal_groups() {
        assert!(ElementGroup::AlkaliMetal.is_metal());
        assert!(ElementGroup::TransitionMetal.is_metal());
        assert!(!ElementGroup::Metalloid.is_metal());
        assert!(!ElementGroup::Halogen.is_metal());
        assert!(!ElementGroup::Nonmetal.is_metal());
    }

    #[test]
    fn test_positive_metal() {
        assert!(element("Na", 1, ElementGroup::AlkaliMetal).is_positive_metal());
        assert!(!element("H", 1, ElementGroup::Nonmetal).is_positive_metal());
        assert!(!element("X", 0, ElementGroup::TransitionMetal).is_positive_metal());
    }

    #[test]
    fn test_display_shows_charge() {
        assert_eq!(element("Cl", -1, ElementGroup::Halogen).to_string(), "Cl-1");
        assert_eq!(element("Na", 1, ElementGroup::AlkaliMetal).to_string(), "Na+1");
    }
}
