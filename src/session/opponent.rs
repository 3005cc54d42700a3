//! The simulated opponent for single-peer play.
//!
//! It makes one attempt per turn: build the first catalog compound its
//! hand can supply, otherwise pass.

use log::debug;

use crate::cards::{Catalog, CompoundId};
use crate::effects::EffectResolver;
use crate::ledger::PlayerLedger;
use crate::rules::first_available_compound;

#[derive(Clone, Copy, Debug, Default)]
pub struct SimpleOpponent;

impl SimpleOpponent {
    /// Play one turn's worth of actions on `ledger`.
    pub fn take_turn(&self, ledger: &mut PlayerLedger, catalog: &Catalog) -> Option<CompoundId> {
        let found = first_available_compound(ledger.hand(), catalog)?;
        match EffectResolver::apply_compound_creation(ledger, &found) {
            Ok(()) => {
                debug!("{} builds {}", ledger.player(), catalog.formula(found.compound));
                Some(found.compound)
            }
            Err(_) => None,
        }
    }
}
