//! Player actions shared by the local and networked games.
//!
//! Each action validates its selection, runs the matcher, hands the match
//! to the `EffectResolver` and then runs the win check. Turn legality is
//! checked by the caller before any of these run; a rejected action
//! leaves the ledger untouched.

use crate::cards::{Catalog, CompoundId, ElementId};
use crate::core::ActionRejected;
use crate::effects::{EffectResolver, ReactionOutcome};
use crate::ledger::PlayerLedger;
use crate::rules::{find_compound, find_reaction};
use crate::turn::TurnCoordinator;

/// Form a compound from exactly the selected elements.
pub fn create_compound(
    turn: &mut TurnCoordinator,
    ledger: &mut PlayerLedger,
    catalog: &Catalog,
    selection: &[ElementId],
) -> Result<CompoundId, ActionRejected> {
    if selection.is_empty() {
        return Err(ActionRejected::EmptySelection);
    }
    if !ledger.holds_elements(selection) {
        return Err(ActionRejected::NotInHand);
    }
    let found = find_compound(selection, catalog).ok_or(ActionRejected::NoMatchingCompound)?;
    EffectResolver::apply_compound_creation(ledger, &found)?;
    turn.check_win(ledger.player(), ledger.compound_count());
    Ok(found.compound)
}

/// Run the reaction the selected compounds satisfy.
pub fn perform_reaction(
    turn: &mut TurnCoordinator,
    ledger: &mut PlayerLedger,
    catalog: &Catalog,
    selection: &[CompoundId],
) -> Result<ReactionOutcome, ActionRejected> {
    if selection.is_empty() {
        return Err(ActionRejected::EmptySelection);
    }
    let found = find_reaction(selection, catalog).ok_or(ActionRejected::NoMatchingReaction)?;
    let reaction = catalog
        .reaction(found.reaction)
        .ok_or(ActionRejected::NoMatchingReaction)?;
    let outcome = EffectResolver::apply_reaction(ledger, reaction, &found.consumed)?;
    turn.check_win(ledger.player(), ledger.compound_count());
    Ok(outcome)
}

/// Possession check ahead of compound activation.
pub fn owned_compound<'c>(
    ledger: &PlayerLedger,
    catalog: &'c Catalog,
    compound: CompoundId,
) -> Result<&'c crate::cards::Compound, ActionRejected> {
    let def = catalog
        .compound(compound)
        .ok_or_else(|| ActionRejected::CompoundNotOwned(compound.to_string()))?;
    if !ledger.owns_compounds(&[compound]) {
        return Err(ActionRejected::CompoundNotOwned(def.formula.clone()));
    }
    Ok(def)
}
