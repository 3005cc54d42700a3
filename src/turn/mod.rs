//! Turn ownership: state types and the coordinator state machine.

pub mod coordinator;
pub mod state;

pub use coordinator::TurnCoordinator;
pub use state::{GameStatus, TurnOwner, TurnPhase, TurnState, TurnToken};
