//! Single-peer game sessions.
//!
//! `LocalGame` owns both ledgers and drives the simulated opponent.
//! The action helpers in `actions` are shared with the networked peer.

pub mod actions;
mod local;
mod opponent;

pub use local::LocalGame;
pub use opponent::SimpleOpponent;
