//! Loader-facing catalog definitions.
//!
//! An external loader produces a `CatalogDefinition` (from a file, an
//! embedded table, anything). Cross references are plain symbol and
//! formula strings; `Catalog::load` resolves and validates them.
//!
//! ## Example
//!
//! ```
//! use compound_ccg::cards::{
//!     Catalog, CatalogDefinition, CompoundDef, EffectDef, ElementDef, ElementGroup,
//! };
//!
//! let def = CatalogDefinition::new()
//!     .with_element(ElementDef::new("H", "Hydrogen", 1, ElementGroup::Nonmetal))
//!     .with_element(ElementDef::new("O", "Oxygen", -2, ElementGroup::Nonmetal))
//!     .with_compound(
//!         CompoundDef::exact("H2O", "Water", &[("H", 2), ("O", 1)])
//!             .with_effect(EffectDef::DrawElements(1)),
//!     );
//!
//! let catalog = Catalog::load(&def).unwrap();
//! assert_eq!(catalog.compound_by_formula("H2O").unwrap().name, "Water");
//! ```

use serde::{Deserialize, Serialize};

use super::compound::SpecialRule;
use super::element::ElementGroup;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementDef {
    pub symbol: String,
    pub name: String,
    pub oxidation_number: i8,
    pub group: ElementGroup,
}

impl ElementDef {
    #[must_use]
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        oxidation_number: i8,
        group: ElementGroup,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            oxidation_number,
            group,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequirementDef {
    /// (symbol, quantity) pairs.
    Exact(Vec<(String, u8)>),
    Special(SpecialRule),
}

/// `CompoundEffect` with element references still unresolved.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectDef {
    #[default]
    None,
    DrawElements(u32),
    SkipOpponentTurn,
    ForceOpponentDiscard(u32),
    ReceiveElements { symbol: String, count: u32 },
    NegateNextDissolution,
    SwapHands,
    DiscardAndRedraw(u32),
    DissolveOpponentCompounds(u32),
}

fn default_once_per_turn() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundDef {
    pub formula: String,
    pub name: String,
    pub requirement: RequirementDef,
    #[serde(default)]
    pub effect: EffectDef,
    #[serde(default = "default_once_per_turn")]
    pub once_per_turn: bool,
}

impl CompoundDef {
    /// Compound built from an exact element multiset.
    #[must_use]
    pub fn exact(
        formula: impl Into<String>,
        name: impl Into<String>,
        parts: &[(&str, u8)],
    ) -> Self {
        Self {
            formula: formula.into(),
            name: name.into(),
            requirement: RequirementDef::Exact(
                parts.iter().map(|(s, q)| ((*s).to_string(), *q)).collect(),
            ),
            effect: EffectDef::None,
            once_per_turn: true,
        }
    }

    /// Compound recognised by a structural rule.
    #[must_use]
    pub fn special(formula: impl Into<String>, name: impl Into<String>, rule: SpecialRule) -> Self {
        Self {
            formula: formula.into(),
            name: name.into(),
            requirement: RequirementDef::Special(rule),
            effect: EffectDef::None,
            once_per_turn: true,
        }
    }

    #[must_use]
    pub fn with_effect(mut self, effect: EffectDef) -> Self {
        self.effect = effect;
        self
    }

    /// The effect can be used every turn without consuming the compound.
    #[must_use]
    pub fn persistent(mut self) -> Self {
        self.once_per_turn = false;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionDef {
    pub name: String,
    /// (formula, quantity) pairs.
    pub required: Vec<(String, u8)>,
    #[serde(default)]
    pub produced_compounds: Vec<String>,
    #[serde(default)]
    pub produced_elements: Vec<String>,
    #[serde(default)]
    pub banish_reactants: bool,
    #[serde(default)]
    pub forcibly_ends_turn: bool,
    #[serde(default)]
    pub reaction_limit_override: Option<u32>,
}

impl ReactionDef {
    #[must_use]
    pub fn new(name: impl Into<String>, required: &[(&str, u8)]) -> Self {
        Self {
            name: name.into(),
            required: required.iter().map(|(f, q)| ((*f).to_string(), *q)).collect(),
            produced_compounds: Vec::new(),
            produced_elements: Vec::new(),
            banish_reactants: false,
            forcibly_ends_turn: false,
            reaction_limit_override: None,
        }
    }

    #[must_use]
    pub fn producing(mut self, formulas: &[&str]) -> Self {
        self.produced_compounds
            .extend(formulas.iter().map(|f| (*f).to_string()));
        self
    }

    #[must_use]
    pub fn releasing(mut self, symbols: &[&str]) -> Self {
        self.produced_elements
            .extend(symbols.iter().map(|s| (*s).to_string()));
        self
    }

    #[must_use]
    pub fn banishing(mut self) -> Self {
        self.banish_reactants = true;
        self
    }

    #[must_use]
    pub fn ending_turn(mut self) -> Self {
        self.forcibly_ends_turn = true;
        self
    }

    #[must_use]
    pub fn with_reaction_limit(mut self, limit: u32) -> Self {
        self.reaction_limit_override = Some(limit);
        self
    }
}

/// Everything a loader hands to `Catalog::load`, in catalog order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDefinition {
    pub elements: Vec<ElementDef>,
    pub compounds: Vec<CompoundDef>,
    #[serde(default)]
    pub reactions: Vec<ReactionDef>,
}

impl CatalogDefinition {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_element(mut self, element: ElementDef) -> Self {
        self.elements.push(element);
        self
    }

    #[must_use]
    pub fn with_compound(mut self, compound: CompoundDef) -> Self {
        self.compounds.push(compound);
        self
    }

    #[must_use]
    pub fn with_reaction(mut self, reaction: ReactionDef) -> Self {
        self.reactions.push(reaction);
        self
    }
}
