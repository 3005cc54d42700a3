//! Counts-only ledger projection.
//!
//! This is all a peer ever learns about its opponent: how many elements
//! are in hand and which compounds are owned. Hand contents never leave
//! the owning process.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub hand_count: u32,
    pub owned_formulas: Vec<String>,
}

impl LedgerSnapshot {
    #[must_use]
    pub fn compound_count(&self) -> usize {
        self.owned_formulas.len()
    }
}
