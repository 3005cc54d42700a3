//! Turn ownership state.
//!
//! Ownership is always expressed from one peer's point of view: `Local`
//! means "the player this coordinator belongs to". Two peers in steady
//! state hold complementary owners and the same token.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnOwner {
    #[default]
    Unassigned,
    Local,
    Remote,
}

impl TurnOwner {
    /// The other side; `Unassigned` stays unassigned.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            TurnOwner::Local => TurnOwner::Remote,
            TurnOwner::Remote => TurnOwner::Local,
            TurnOwner::Unassigned => TurnOwner::Unassigned,
        }
    }

    /// Ownership of `holder`'s turn as seen by `me`.
    #[must_use]
    pub fn seen_by(holder: PlayerId, me: PlayerId) -> Self {
        if holder == me {
            TurnOwner::Local
        } else {
            TurnOwner::Remote
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Ownership committed, deal not yet run.
    #[default]
    TurnStart,
    /// Dealt; the owner may act.
    Acting,
    /// The owner has ended the turn; handoff in progress.
    Ended,
}

/// Monotonically increasing handoff counter. Zero means "no turn yet".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TurnToken(pub u64);

impl TurnToken {
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// `self` supersedes `other`.
    #[must_use]
    pub fn is_newer_than(self, other: TurnToken) -> bool {
        self.0 > other.0
    }
}

impl std::fmt::Display for TurnToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnState {
    pub owner: TurnOwner,
    pub phase: TurnPhase,
    pub token: TurnToken,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    InProgress,
    GameOver { winner: PlayerId },
}
