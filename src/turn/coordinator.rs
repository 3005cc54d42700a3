//! The turn-ownership state machine.
//!
//! ```text
//! Unassigned ──begin──▶ LocalTurn ◀──end_turn/commit──▶ RemoteTurn
//!                           │                              │
//!                           └──────────▶ GameOver ◀────────┘
//! ```
//!
//! `TurnCoordinator` is shared by both modes. Single-peer play calls
//! `end_turn`, which flips ownership immediately. Networked play calls
//! `release_turn` and later `commit`s whatever ownership the handoff
//! protocol settles on.

use log::info;

use crate::core::{ActionRejected, PlayerId};
use crate::ledger::PlayerLedger;

use super::state::{GameStatus, TurnOwner, TurnPhase, TurnState, TurnToken};

#[derive(Clone, Debug)]
pub struct TurnCoordinator {
    me: PlayerId,
    state: TurnState,
    status: GameStatus,
    win_condition: usize,
}

impl TurnCoordinator {
    #[must_use]
    pub fn new(me: PlayerId, win_condition: usize) -> Self {
        Self {
            me,
            state: TurnState::default(),
            status: GameStatus::InProgress,
            win_condition,
        }
    }

    // === Queries ===

    #[must_use]
    pub fn me(&self) -> PlayerId {
        self.me
    }

    #[must_use]
    pub fn state(&self) -> TurnState {
        self.state
    }

    #[must_use]
    pub fn owner(&self) -> TurnOwner {
        self.state.owner
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.state.phase
    }

    #[must_use]
    pub fn token(&self) -> TurnToken {
        self.state.token
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        matches!(self.status, GameStatus::GameOver { .. })
    }

    /// Seat whose turn it is, if any.
    #[must_use]
    pub fn current_player(&self) -> Option<PlayerId> {
        match self.state.owner {
            TurnOwner::Local => Some(self.me),
            TurnOwner::Remote => Some(self.me.opponent()),
            TurnOwner::Unassigned => None,
        }
    }

    /// Mutating actions are only legal for the local owner while acting.
    pub fn ensure_can_act(&self) -> Result<(), ActionRejected> {
        if self.is_game_over() {
            return Err(ActionRejected::GameOver);
        }
        if self.state.owner != TurnOwner::Local || self.state.phase != TurnPhase::Acting {
            return Err(ActionRejected::NotYourTurn);
        }
        Ok(())
    }

    // === Transitions ===

    /// Commit ownership for `token`, entering `TurnStart`.
    ///
    /// Tokens that do not supersede the current one are ignored and
    /// `false` is returned.
    pub fn commit(&mut self, owner: TurnOwner, token: TurnToken) -> bool {
        if !token.is_newer_than(self.state.token) {
            return false;
        }
        self.state = TurnState {
            owner,
            phase: TurnPhase::TurnStart,
            token,
        };
        info!("{}: turn {} now {:?}", self.me, token, owner);
        true
    }

    /// The deal has run; the owner may act.
    pub fn begin_acting(&mut self) {
        if self.state.phase == TurnPhase::TurnStart {
            self.state.phase = TurnPhase::Acting;
        }
    }

    /// Single-peer end of turn: reset the ending ledger and flip.
    ///
    /// Returns the token of the new turn.
    pub fn end_turn(&mut self, ending: &mut PlayerLedger) -> TurnToken {
        ending.reset_turn();
        let next = self.state.token.next();
        self.commit(self.state.owner.flipped(), next);
        next
    }

    /// Networked end of turn: reset the ending ledger and mark the turn
    /// ended, keeping ownership until the handoff is observed.
    ///
    /// Returns the token the handoff should carry.
    pub fn release_turn(&mut self, ending: &mut PlayerLedger) -> TurnToken {
        ending.reset_turn();
        self.state.phase = TurnPhase::Ended;
        self.state.token.next()
    }

    /// Recovery: adopt `owner` for `token` regardless of the handoff.
    pub fn force(&mut self, owner: TurnOwner, token: TurnToken) {
        self.state = TurnState {
            owner,
            phase: TurnPhase::TurnStart,
            token: token.max(self.state.token),
        };
    }

    /// Win check after anything that can add a compound.
    ///
    /// The first ledger checked at or above the threshold wins.
    pub fn check_win(&mut self, player: PlayerId, compound_count: usize) -> Option<PlayerId> {
        if self.is_game_over() {
            return None;
        }
        if compound_count >= self.win_condition {
            self.status = GameStatus::GameOver { winner: player };
            info!("{} wins with {} compounds", player, compound_count);
            return Some(player);
        }
        None
    }

    /// Accept a game-over decided elsewhere.
    pub fn declare_winner(&mut self, winner: PlayerId) {
        if !self.is_game_over() {
            self.status = GameStatus::GameOver { winner };
            info!("{}: game over, {} wins", self.me, winner);
        }
    }
}
