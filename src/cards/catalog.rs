//! The immutable rule catalog.
//!
//! `Catalog::load` turns a `CatalogDefinition` into id-indexed elements,
//! compounds and reactions, preserving definition order (the matcher
//! relies on it) and rejecting malformed data up front.

use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::{smallvec, SmallVec};

use crate::core::CatalogError;

use super::compound::{
    Compound, CompoundEffect, CompoundId, ElementCounts, Requirement, SpecialRule,
};
use super::definition::{CatalogDefinition, EffectDef, RequirementDef};
use super::element::{Element, ElementId};
use super::reaction::{Reaction, ReactionId};

/// Elements the special rules look up by symbol.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RuleElements {
    pub hydrogen: Option<ElementId>,
    pub carbon: Option<ElementId>,
    pub oxygen: Option<ElementId>,
}

/// Immutable set of element, compound and reaction definitions.
#[derive(Clone, Debug)]
pub struct Catalog {
    elements: Vec<Element>,
    compounds: Vec<Compound>,
    reactions: Vec<Reaction>,
    by_symbol: FxHashMap<String, ElementId>,
    by_formula: FxHashMap<String, CompoundId>,
    rule_elements: RuleElements,
}

impl Catalog {
    /// Resolve and validate a definition.
    pub fn load(def: &CatalogDefinition) -> Result<Self, CatalogError> {
        if def.elements.is_empty() {
            return Err(CatalogError::NoElements);
        }

        let mut elements = Vec::with_capacity(def.elements.len());
        let mut by_symbol = FxHashMap::default();
        for (i, e) in def.elements.iter().enumerate() {
            let id = ElementId::new(id_index("element", i)?);
            if by_symbol.insert(e.symbol.clone(), id).is_some() {
                return Err(CatalogError::DuplicateElement(e.symbol.clone()));
            }
            elements.push(Element {
                id,
                symbol: e.symbol.clone(),
                name: e.name.clone(),
                oxidation_number: e.oxidation_number,
                group: e.group,
            });
        }

        let rule_elements = RuleElements {
            hydrogen: by_symbol.get("H").copied(),
            carbon: by_symbol.get("C").copied(),
            oxygen: by_symbol.get("O").copied(),
        };

        let element_ref = |owner: &str, symbol: &str| {
            by_symbol
                .get(symbol)
                .copied()
                .ok_or_else(|| CatalogError::UnknownElement {
                    owner: owner.to_string(),
                    symbol: symbol.to_string(),
                })
        };

        let mut by_formula = FxHashMap::default();
        for (i, c) in def.compounds.iter().enumerate() {
            if by_formula
                .insert(c.formula.clone(), CompoundId::new(id_index("compound", i)?))
                .is_some()
            {
                return Err(CatalogError::DuplicateCompound(c.formula.clone()));
            }
        }

        let mut compounds = Vec::with_capacity(def.compounds.len());
        for (i, c) in def.compounds.iter().enumerate() {
            let requirement = match &c.requirement {
                RequirementDef::Exact(parts) => {
                    if parts.is_empty() {
                        return Err(CatalogError::EmptyRequirement(c.formula.clone()));
                    }
                    let mut counts = ElementCounts::new();
                    let mut seen = FxHashSet::default();
                    for (symbol, quantity) in parts {
                        let id = element_ref(&c.formula, symbol)?;
                        if *quantity == 0 {
                            return Err(CatalogError::ZeroQuantity {
                                formula: c.formula.clone(),
                                symbol: symbol.clone(),
                            });
                        }
                        if !seen.insert(id) {
                            return Err(CatalogError::RepeatedRequirement {
                                formula: c.formula.clone(),
                                symbol: symbol.clone(),
                            });
                        }
                        counts.push((id, *quantity));
                    }
                    Requirement::Exact(counts)
                }
                RequirementDef::Special(rule) => {
                    check_rule_elements(&c.formula, *rule, &rule_elements)?;
                    Requirement::Special(*rule)
                }
            };

            let effect = match &c.effect {
                EffectDef::None => CompoundEffect::None,
                EffectDef::DrawElements(n) => CompoundEffect::DrawElements(*n),
                EffectDef::SkipOpponentTurn => CompoundEffect::SkipOpponentTurn,
                EffectDef::ForceOpponentDiscard(n) => CompoundEffect::ForceOpponentDiscard(*n),
                EffectDef::ReceiveElements { symbol, count } => CompoundEffect::ReceiveElements {
                    element: element_ref(&c.formula, symbol)?,
                    count: *count,
                },
                EffectDef::NegateNextDissolution => CompoundEffect::NegateNextDissolution,
                EffectDef::SwapHands => CompoundEffect::SwapHands,
                EffectDef::DiscardAndRedraw(n) => CompoundEffect::DiscardAndRedraw(*n),
                EffectDef::DissolveOpponentCompounds(n) => {
                    CompoundEffect::DissolveOpponentCompounds(*n)
                }
            };

            compounds.push(Compound {
                id: CompoundId::new(id_index("compound", i)?),
                formula: c.formula.clone(),
                name: c.name.clone(),
                requirement,
                effect,
                once_per_turn: c.once_per_turn,
            });
        }

        let compound_ref = |owner: &str, formula: &str| {
            by_formula
                .get(formula)
                .copied()
                .ok_or_else(|| CatalogError::UnknownCompound {
                    owner: owner.to_string(),
                    formula: formula.to_string(),
                })
        };

        let mut reactions = Vec::with_capacity(def.reactions.len());
        for (i, r) in def.reactions.iter().enumerate() {
            if r.required.is_empty() {
                return Err(CatalogError::EmptyReaction(r.name.clone()));
            }
            let mut required: SmallVec<[(CompoundId, u8); 4]> = SmallVec::new();
            for (formula, quantity) in &r.required {
                let id = compound_ref(&r.name, formula)?;
                if *quantity == 0 {
                    return Err(CatalogError::ZeroQuantity {
                        formula: r.name.clone(),
                        symbol: formula.clone(),
                    });
                }
                match required.iter_mut().find(|(c, _)| *c == id) {
                    Some((_, q)) => *q = q.saturating_add(*quantity),
                    None => required.push((id, *quantity)),
                }
            }

            let produced_compounds = r
                .produced_compounds
                .iter()
                .map(|f| compound_ref(&r.name, f))
                .collect::<Result<Vec<_>, _>>()?;
            let produced_elements = r
                .produced_elements
                .iter()
                .map(|s| element_ref(&r.name, s))
                .collect::<Result<Vec<_>, _>>()?;

            reactions.push(Reaction {
                id: ReactionId(id_index("reaction", i)?),
                name: r.name.clone(),
                required,
                produced_compounds,
                produced_elements,
                banish_reactants: r.banish_reactants,
                forcibly_ends_turn: r.forcibly_ends_turn,
                reaction_limit_override: r.reaction_limit_override,
            });
        }

        debug!(
            "catalog loaded: {} elements, {} compounds, {} reactions",
            elements.len(),
            compounds.len(),
            reactions.len()
        );

        Ok(Self {
            elements,
            compounds,
            reactions,
            by_symbol,
            by_formula,
            rule_elements,
        })
    }

    /// All elements, in draw order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// All compounds, in matching order.
    #[must_use]
    pub fn compounds(&self) -> &[Compound] {
        &self.compounds
    }

    /// All reactions, in matching order.
    #[must_use]
    pub fn reactions(&self) -> &[Reaction] {
        &self.reactions
    }

    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.index())
    }

    #[must_use]
    pub fn compound(&self, id: CompoundId) -> Option<&Compound> {
        self.compounds.get(id.index())
    }

    #[must_use]
    pub fn reaction(&self, id: ReactionId) -> Option<&Reaction> {
        self.reactions.get(id.0 as usize)
    }

    #[must_use]
    pub fn element_by_symbol(&self, symbol: &str) -> Option<&Element> {
        self.by_symbol.get(symbol).and_then(|id| self.element(*id))
    }

    #[must_use]
    pub fn compound_by_formula(&self, formula: &str) -> Option<&Compound> {
        self.by_formula.get(formula).and_then(|id| self.compound(*id))
    }

    /// Formula of a compound id, for snapshots and logs.
    #[must_use]
    pub fn formula(&self, id: CompoundId) -> &str {
        self.compound(id).map_or("?", |c| c.formula.as_str())
    }

    #[must_use]
    pub fn rule_elements(&self) -> RuleElements {
        self.rule_elements
    }
}

/// Position in a catalog table as a 16-bit id.
fn id_index(kind: &'static str, i: usize) -> Result<u16, CatalogError> {
    u16::try_from(i).map_err(|_| CatalogError::TooManyEntries {
        kind,
        max: usize::from(u16::MAX) + 1,
    })
}

fn check_rule_elements(
    formula: &str,
    rule: SpecialRule,
    rule_elements: &RuleElements,
) -> Result<(), CatalogError> {
    let needed: SmallVec<[(&'static str, Option<ElementId>); 2]> = match rule {
        SpecialRule::Metallic => SmallVec::new(),
        SpecialRule::MetalHydride => smallvec![("H", rule_elements.hydrogen)],
        SpecialRule::Hydrocarbon => {
            smallvec![("C", rule_elements.carbon), ("H", rule_elements.hydrogen)]
        }
        SpecialRule::NetworkSolid => smallvec![("C", rule_elements.carbon)],
        SpecialRule::MetalOxide => smallvec![("O", rule_elements.oxygen)],
    };
    for (symbol, present) in needed {
        if present.is_none() {
            return Err(CatalogError::MissingRuleElement {
                formula: formula.to_string(),
                symbol,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CompoundDef, ElementDef, ElementGroup, ReactionDef};

    fn base() -> CatalogDefinition {
        CatalogDefinition::new()
            .with_element(ElementDef::new("H", "Hydrogen", 1, ElementGroup::Nonmetal))
            .with_element(ElementDef::new("O", "Oxygen", -2, ElementGroup::Nonmetal))
            .with_element(ElementDef::new("Na", "Sodium", 1, ElementGroup::AlkaliMetal))
    }

    #[test]
    fn test_id_index_bounds() {
        assert_eq!(id_index("element", 0), Ok(0));
        assert_eq!(id_index("element", 65_535), Ok(u16::MAX));
        assert_eq!(
            id_index("reaction", 65_536),
            Err(CatalogError::TooManyEntries {
                kind: "reaction",
                max: 65_536
            })
        );
    }

    #[test]
    fn test_oversized_element_table_rejected() {
        let mut def = CatalogDefinition::new();
        def.elements = (0..=usize::from(u16::MAX) + 1)
            .map(|i| ElementDef::new(format!("E{i}"), "Filler", 1, ElementGroup::Nonmetal))
            .collect();

        assert_eq!(
            Catalog::load(&def).unwrap_err(),
            CatalogError::TooManyEntries {
                kind: "element",
                max: 65_536
            }
        );
    }

    #[test]
    fn test_load_preserves_order_and_lookups() {
        let def = base()
            .with_compound(CompoundDef::exact("H2O", "Water", &[("H", 2), ("O", 1)]))
            .with_compound(CompoundDef::exact("H2", "Hydrogen Gas", &[("H", 2)]))
            .with_reaction(
                ReactionDef::new("Combine", &[("H2", 1), ("H2", 1)]).producing(&["H2O"]),
            );

        let catalog = Catalog::load(&def).unwrap();

        assert_eq!(catalog.elements().len(), 3);
        assert_eq!(catalog.compounds()[0].formula, "H2O");
        assert_eq!(catalog.compounds()[1].formula, "H2");
        assert_eq!(catalog.element_by_symbol("Na").unwrap().id, ElementId::new(2));
        assert_eq!(catalog.formula(CompoundId::new(1)), "H2");
        assert_eq!(catalog.rule_elements().carbon, None);

        // Repeated reactant entries fold into one count.
        let combine = &catalog.reactions()[0];
        assert_eq!(combine.required.as_slice(), &[(CompoundId::new(1), 2)]);
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert_eq!(
            Catalog::load(&CatalogDefinition::new()).unwrap_err(),
            CatalogError::NoElements
        );
    }

    #[test]
    fn test_duplicates_rejected() {
        let dup_element =
            base().with_element(ElementDef::new("H", "Again", 1, ElementGroup::Nonmetal));
        assert_eq!(
            Catalog::load(&dup_element).unwrap_err(),
            CatalogError::DuplicateElement("H".into())
        );

        let dup_compound = base()
            .with_compound(CompoundDef::exact("H2", "A", &[("H", 2)]))
            .with_compound(CompoundDef::exact("H2", "B", &[("H", 2)]));
        assert_eq!(
            Catalog::load(&dup_compound).unwrap_err(),
            CatalogError::DuplicateCompound("H2".into())
        );
    }

    #[test]
    fn test_unknown_references_rejected() {
        let bad_requirement = base().with_compound(CompoundDef::exact("XO", "?", &[("X", 1)]));
        assert!(matches!(
            Catalog::load(&bad_requirement),
            Err(CatalogError::UnknownElement { .. })
        ));

        let bad_effect = base().with_compound(
            CompoundDef::exact("H2", "Hydrogen Gas", &[("H", 2)]).with_effect(
                EffectDef::ReceiveElements {
                    symbol: "Zz".into(),
                    count: 1,
                },
            ),
        );
        assert_eq!(
            Catalog::load(&bad_effect).unwrap_err(),
            CatalogError::UnknownElement {
                owner: "H2".into(),
                symbol: "Zz".into()
            }
        );

        let bad_reaction = base().with_reaction(ReactionDef::new("Nothing", &[("CO2", 1)]));
        assert!(matches!(
            Catalog::load(&bad_reaction),
            Err(CatalogError::UnknownCompound { .. })
        ));
    }

    #[test]
    fn test_malformed_requirements_rejected() {
        let zero = base().with_compound(CompoundDef::exact("H0", "?", &[("H", 0)]));
        assert!(matches!(Catalog::load(&zero), Err(CatalogError::ZeroQuantity { .. })));

        let repeated = base().with_compound(CompoundDef::exact("HH", "?", &[("H", 1), ("H", 1)]));
        assert!(matches!(
            Catalog::load(&repeated),
            Err(CatalogError::RepeatedRequirement { .. })
        ));

        let empty = base().with_compound(CompoundDef::exact("", "?", &[]));
        assert!(matches!(Catalog::load(&empty), Err(CatalogError::EmptyRequirement(_))));
    }

    #[test]
    fn test_special_rule_needs_its_elements() {
        let no_carbon =
            base().with_compound(CompoundDef::special("C", "Diamond", SpecialRule::NetworkSolid));
        assert_eq!(
            Catalog::load(&no_carbon).unwrap_err(),
            CatalogError::MissingRuleElement {
                formula: "C".into(),
                symbol: "C"
            }
        );

        let hydride = base().with_compound(CompoundDef::special(
            "MH",
            "Metal Hydride",
            SpecialRule::MetalHydride,
        ));
        assert!(Catalog::load(&hydride).is_ok());
    }
}
