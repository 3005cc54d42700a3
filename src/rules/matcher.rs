//! Matching selections against the catalog.
//!
//! All functions here are pure: they read the catalog and a selection and
//! say what (if anything) the selection forms. They never touch a ledger,
//! and they trust the caller to pass only cards the actor owns.
//!
//! ## Policy
//!
//! - Compounds and reactions are tried in catalog order; the first
//!   satisfied one wins.
//! - Exact requirements need exact multiset equality.
//! - Special rules only need the structure to be *present*; they consume
//!   just the cards that form it, chosen in selection order.
//! - An empty selection never matches.

use log::debug;
use smallvec::{smallvec, SmallVec};

use crate::cards::{Catalog, CompoundId, ElementId, ReactionId, Requirement, SpecialRule};

use super::multiset::{contains_requirement, equals_requirement};

/// Elements a compound creation will take out of the hand.
pub type ConsumedElements = SmallVec<[ElementId; 4]>;

/// A selection that forms a compound.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompoundMatch {
    pub compound: CompoundId,
    pub consumed: ConsumedElements,
}

/// A selection that satisfies a reaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReactionMatch {
    pub reaction: ReactionId,
    pub consumed: SmallVec<[CompoundId; 4]>,
}

/// First compound (catalog order) the selection forms.
///
/// ```
/// use compound_ccg::games::standard;
/// use compound_ccg::rules::find_compound;
///
/// let catalog = standard::catalog();
/// let h = catalog.element_by_symbol("H").unwrap().id;
/// let o = catalog.element_by_symbol("O").unwrap().id;
///
/// let water = find_compound(&[h, h, o], &catalog).unwrap();
/// assert_eq!(catalog.formula(water.compound), "H2O");
///
/// // Superset of water's requirement: no exact match.
/// let extra = find_compound(&[h, h, h, o], &catalog);
/// assert!(extra.map_or(true, |m| catalog.formula(m.compound) != "H2O"));
/// ```
pub fn find_compound(selection: &[ElementId], catalog: &Catalog) -> Option<CompoundMatch> {
    if selection.is_empty() {
        return None;
    }

    let found = catalog.compounds().iter().find_map(|compound| {
        let consumed = match &compound.requirement {
            Requirement::Exact(req) => {
                equals_requirement(selection, req).then(|| selection.iter().copied().collect())
            }
            Requirement::Special(rule) => special_match(*rule, selection, catalog),
        }?;
        Some(CompoundMatch {
            compound: compound.id,
            consumed,
        })
    });

    if let Some(m) = &found {
        debug!("selection of {} forms {}", selection.len(), catalog.formula(m.compound));
    }
    found
}

/// First reaction (catalog order) whose reactants equal the selection.
pub fn find_reaction(selection: &[CompoundId], catalog: &Catalog) -> Option<ReactionMatch> {
    if selection.is_empty() {
        return None;
    }

    catalog
        .reactions()
        .iter()
        .find(|reaction| equals_requirement(selection, &reaction.required))
        .map(|reaction| ReactionMatch {
            reaction: reaction.id,
            consumed: selection.iter().copied().collect(),
        })
}

/// First compound (catalog order) that can be built from *some* part of
/// `hand`.
///
/// Unlike `find_compound`, exact requirements only need to be contained
/// in the hand. This is the "first legal match" used by the simulated
/// opponent.
pub fn first_available_compound(hand: &[ElementId], catalog: &Catalog) -> Option<CompoundMatch> {
    if hand.is_empty() {
        return None;
    }

    catalog.compounds().iter().find_map(|compound| {
        let consumed = match &compound.requirement {
            Requirement::Exact(req) => contains_requirement(hand, req).then(|| {
                req.iter()
                    .flat_map(|(e, q)| std::iter::repeat(*e).take(*q as usize))
                    .collect()
            }),
            Requirement::Special(rule) => special_match(*rule, hand, catalog),
        }?;
        Some(CompoundMatch {
            compound: compound.id,
            consumed,
        })
    })
}

/// Evaluate a structural rule, returning the cards it would consume.
pub fn special_match(
    rule: SpecialRule,
    selection: &[ElementId],
    catalog: &Catalog,
) -> Option<ConsumedElements> {
    let rules = catalog.rule_elements();
    let is_positive_metal =
        |id: &ElementId| catalog.element(*id).is_some_and(|e| e.is_positive_metal());

    match rule {
        SpecialRule::Metallic => {
            // Groups keyed by oxidation number, ordered by first appearance;
            // the first group with three members gives its first three.
            let mut groups: SmallVec<[(i8, ConsumedElements); 4]> = SmallVec::new();
            for id in selection.iter().filter(|id| is_positive_metal(*id)) {
                let oxidation = catalog.element(*id)?.oxidation_number;
                match groups.iter_mut().find(|(ox, _)| *ox == oxidation) {
                    Some((_, members)) => members.push(*id),
                    None => groups.push((oxidation, smallvec![*id])),
                }
            }
            groups
                .into_iter()
                .find(|(_, members)| members.len() >= 3)
                .map(|(_, members)| members.into_iter().take(3).collect())
        }
        SpecialRule::MetalHydride => {
            let metal = selection.iter().copied().find(|id| is_positive_metal(id))?;
            let hydrogen = take(selection, rules.hydrogen?, 1)?;
            Some(std::iter::once(metal).chain(hydrogen).collect())
        }
        SpecialRule::Hydrocarbon => {
            let carbon = take(selection, rules.carbon?, 1)?;
            let hydrogen = take(selection, rules.hydrogen?, 4)?;
            Some(carbon.into_iter().chain(hydrogen).collect())
        }
        SpecialRule::NetworkSolid => take(selection, rules.carbon?, 4),
        SpecialRule::MetalOxide => {
            let metal = selection.iter().copied().find(|id| is_positive_metal(id))?;
            let oxygen = take(selection, rules.oxygen?, 1)?;
            Some(std::iter::once(metal).chain(oxygen).collect())
        }
    }
}

/// `count` copies of `element`, if the selection holds that many.
fn take(selection: &[ElementId], element: ElementId, count: usize) -> Option<ConsumedElements> {
    let available = selection.iter().filter(|id| **id == element).count();
    (available >= count).then(|| std::iter::repeat(element).take(count).collect())
}
