//! Player ledgers and the opponent-facing snapshot.
//!
//! Each peer is the sole mutator of its own `PlayerLedger`. The opponent
//! is only ever seen through a `LedgerSnapshot`.

pub mod player_ledger;
pub mod snapshot;

pub use player_ledger::PlayerLedger;
pub use snapshot::LedgerSnapshot;
