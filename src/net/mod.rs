//! Networked two-peer play over a shared room store and a best-effort
//! message channel.

pub mod channel;
pub mod message;
mod peer;

pub use channel::{MemoryEndpoint, MemoryRoom, MessageChannel, RoomStore, TURN_KEY};
pub use message::{PeerMessage, TurnHandoff};
pub use peer::{NetworkedGame, PeerEvent};
