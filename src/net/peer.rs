//! One peer of a networked two-player game.
//!
//! Each peer owns only its own `PlayerLedger`; the opponent is known
//! through the `LedgerSnapshot`s it broadcasts. Turn ownership is decided
//! by the `TurnHandoff` in the room store and applied only when its token
//! supersedes the last one committed.
//!
//! ## Handoff
//!
//! Ending a turn writes `{opponent, token + 1}` to the store and sends the
//! same handoff as a hint. The ending peer stays in `Ended` until it sees
//! the write come back, or the opponent's snapshot for the new token
//! arrives.
//!
//! ## Recovery
//!
//! Writes and messages may be lost. A peer waiting on its own handoff for
//! `recovery_timeout_ticks` adopts it anyway and rewrites it, and keeps
//! rewriting each timeout until it is acknowledged. A peer holding a hint
//! that names it owner, with no matching store write after the same
//! timeout, takes the turn and writes the handoff itself. Both paths
//! converge on the same `{owner, token}`.

use log::{debug, info, warn};
use serde::Serialize;

use crate::cards::{Catalog, CompoundId, ElementId};
use crate::core::{
    ActionRejected, ConfigError, GameConfig, GameRng, OpponentEffects, PlayerId,
};
use crate::effects::{EffectOutcome, EffectResolver, ReactionOutcome, ResolverContext};
use crate::ledger::{LedgerSnapshot, PlayerLedger};
use crate::session::actions;
use crate::turn::{GameStatus, TurnCoordinator, TurnOwner, TurnToken};

use super::channel::{MessageChannel, RoomStore, TURN_KEY};
use super::message::{self, PeerMessage, TurnHandoff};

/// Something a frontend may want to react to, returned from `tick`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PeerEvent {
    /// This peer now owns the turn and has been dealt.
    TurnStarted(TurnToken),
    /// The opponent now owns the turn.
    TurnPassed(TurnToken),
    /// A newer opponent snapshot was applied.
    OpponentUpdated,
    /// Ownership was adopted by timeout rather than observed.
    Recovered { owner: TurnOwner, token: TurnToken },
    GameOver { winner: PlayerId },
}

#[derive(Clone, Copy, Debug)]
struct Awaiting {
    handoff: TurnHandoff,
    since: u64,
}

/// A networked game as seen from `me`.
pub struct NetworkedGame<T> {
    me: PlayerId,
    catalog: Catalog,
    config: GameConfig,
    ledger: PlayerLedger,
    opponent: LedgerSnapshot,
    turn: TurnCoordinator,
    rng: GameRng,
    transport: T,
    tick: u64,
    sent_sequence: u64,
    seen_sequence: u64,
    /// A handoff this peer wrote and has not seen acknowledged.
    outgoing: Option<Awaiting>,
    /// A hinted handoff naming this peer that the store has not shown.
    incoming: Option<Awaiting>,
    outcome_sent: bool,
}

impl<T: RoomStore + MessageChannel> NetworkedGame<T> {
    pub fn new(
        me: PlayerId,
        catalog: Catalog,
        config: GameConfig,
        transport: T,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = GameRng::new(config.seed).for_context(&me.to_string());
        Ok(Self {
            me,
            ledger: PlayerLedger::new(me, config.hand_limit),
            opponent: LedgerSnapshot::default(),
            turn: TurnCoordinator::new(me, config.win_condition),
            rng,
            transport,
            tick: 0,
            sent_sequence: 0,
            seen_sequence: 0,
            outgoing: None,
            incoming: None,
            outcome_sent: false,
            catalog,
            config,
        })
    }

    // === Queries ===

    #[must_use]
    pub fn me(&self) -> PlayerId {
        self.me
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn ledger(&self) -> &PlayerLedger {
        &self.ledger
    }

    /// Latest snapshot received from the opponent.
    #[must_use]
    pub fn opponent_view(&self) -> &LedgerSnapshot {
        &self.opponent
    }

    #[must_use]
    pub fn turn(&self) -> &TurnCoordinator {
        &self.turn
    }

    #[must_use]
    pub fn owner(&self) -> TurnOwner {
        self.turn.owner()
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.turn.status()
    }

    /// Whether a handoff is still waiting on acknowledgement or recovery.
    #[must_use]
    pub fn handoff_pending(&self) -> bool {
        self.outgoing.is_some() || self.incoming.is_some()
    }

    // === Driving ===

    /// Assign the first turn. Called by exactly one peer.
    pub fn start(&mut self, first: PlayerId) {
        let handoff = TurnHandoff {
            turn_owner: first,
            turn_token: self.turn.token().next(),
        };
        info!("{}: opening the game, {} moves first", self.me, first);
        self.publish(handoff);
        self.outgoing = Some(Awaiting {
            handoff,
            since: self.tick,
        });
    }

    /// Advance one tick: drain messages, poll the store, run recovery.
    pub fn tick(&mut self) -> Vec<PeerEvent> {
        self.tick += 1;
        let mut events = Vec::new();

        while let Some(bytes) = self.transport.receive() {
            match message::decode::<PeerMessage>(&bytes).and_then(PeerMessage::checked) {
                Ok(msg) => self.handle_message(msg, &mut events),
                Err(e) => warn!("{}: dropping message: {}", self.me, e),
            }
        }

        if !self.turn.is_game_over() {
            self.poll_store(&mut events);
            self.check_timeouts(&mut events);
        }
        events
    }

    fn handle_message(&mut self, msg: PeerMessage, events: &mut Vec<PeerEvent>) {
        match msg {
            PeerMessage::Snapshot {
                sequence,
                turn_token,
                snapshot,
            } => {
                if sequence <= self.seen_sequence {
                    debug!("{}: ignoring stale snapshot {}", self.me, sequence);
                    return;
                }
                self.seen_sequence = sequence;
                let count = snapshot.compound_count();
                self.opponent = snapshot;
                events.push(PeerEvent::OpponentUpdated);

                if let Some(winner) = self.turn.check_win(self.me.opponent(), count) {
                    events.push(PeerEvent::GameOver { winner });
                    return;
                }
                if let Some(out) = self.outgoing {
                    if !out.handoff.turn_token.is_newer_than(turn_token) {
                        self.apply_handoff(out.handoff, events);
                    }
                }
            }
            PeerMessage::Handoff(handoff) => {
                if !handoff.turn_token.is_newer_than(self.turn.token()) {
                    return;
                }
                if handoff.turn_owner == self.me {
                    let newer = self.incoming.map_or(true, |inc| {
                        handoff.turn_token.is_newer_than(inc.handoff.turn_token)
                    });
                    if newer {
                        self.incoming = Some(Awaiting {
                            handoff,
                            since: self.tick,
                        });
                    }
                } else {
                    self.apply_handoff(handoff, events);
                }
            }
            PeerMessage::GameOutcome { winner } => {
                if !self.turn.is_game_over() {
                    self.turn.declare_winner(winner);
                    events.push(PeerEvent::GameOver { winner });
                }
                self.outgoing = None;
                self.incoming = None;
            }
        }
    }

    fn poll_store(&mut self, events: &mut Vec<PeerEvent>) {
        let Some(bytes) = self.transport.get(TURN_KEY) else {
            return;
        };
        match message::decode::<TurnHandoff>(&bytes).and_then(TurnHandoff::checked) {
            Ok(handoff) => self.apply_handoff(handoff, events),
            Err(e) => warn!("{}: unreadable turn handoff: {}", self.me, e),
        }
    }

    fn apply_handoff(&mut self, handoff: TurnHandoff, events: &mut Vec<PeerEvent>) {
        self.settle(handoff.turn_token);
        let owner = TurnOwner::seen_by(handoff.turn_owner, self.me);
        if !self.turn.commit(owner, handoff.turn_token) {
            return;
        }
        match owner {
            TurnOwner::Local => self.start_local_turn(events),
            _ => events.push(PeerEvent::TurnPassed(handoff.turn_token)),
        }
    }

    /// Drop waits that `token` has caught up with.
    fn settle(&mut self, token: TurnToken) {
        let caught_up = |a: Option<Awaiting>| {
            a.is_some_and(|a| !a.handoff.turn_token.is_newer_than(token))
        };
        if caught_up(self.outgoing) {
            self.outgoing = None;
        }
        if caught_up(self.incoming) {
            self.incoming = None;
        }
    }

    fn check_timeouts(&mut self, events: &mut Vec<PeerEvent>) {
        let timeout = u64::from(self.config.recovery_timeout_ticks);

        if let Some(out) = self.outgoing {
            if self.tick - out.since >= timeout {
                self.recover_outgoing(out.handoff, events);
            }
        }
        if let Some(inc) = self.incoming {
            if self.tick - inc.since >= timeout {
                self.recover_incoming(inc.handoff, events);
            }
        }
    }

    fn recover_outgoing(&mut self, handoff: TurnHandoff, events: &mut Vec<PeerEvent>) {
        warn!(
            "{}: handoff {} to {} unacknowledged, re-asserting",
            self.me, handoff.turn_token, handoff.turn_owner
        );
        if handoff.turn_token.is_newer_than(self.turn.token()) {
            let owner = TurnOwner::seen_by(handoff.turn_owner, self.me);
            self.turn.force(owner, handoff.turn_token);
            events.push(PeerEvent::Recovered {
                owner,
                token: handoff.turn_token,
            });
            if owner == TurnOwner::Local {
                self.start_local_turn(events);
            }
        }
        self.publish(handoff);
        self.outgoing = Some(Awaiting {
            handoff,
            since: self.tick,
        });
    }

    fn recover_incoming(&mut self, handoff: TurnHandoff, events: &mut Vec<PeerEvent>) {
        self.incoming = None;
        if !handoff.turn_token.is_newer_than(self.turn.token()) {
            return;
        }
        warn!(
            "{}: handoff {} never reached the room, taking the turn",
            self.me, handoff.turn_token
        );
        self.turn.force(TurnOwner::Local, handoff.turn_token);
        events.push(PeerEvent::Recovered {
            owner: TurnOwner::Local,
            token: handoff.turn_token,
        });
        self.publish(handoff);
        self.start_local_turn(events);
    }

    fn start_local_turn(&mut self, events: &mut Vec<PeerEvent>) {
        let dealt = self
            .ledger
            .deal_elements(&self.catalog, &mut self.rng, &self.config.deal_table);
        debug!("{}: dealt {} at turn {}", self.me, dealt, self.turn.token());
        self.turn.begin_acting();
        self.broadcast_snapshot();
        events.push(PeerEvent::TurnStarted(self.turn.token()));
    }

    // === Outbound ===

    fn publish(&mut self, handoff: TurnHandoff) {
        match message::encode(&handoff) {
            Ok(bytes) => self.transport.set(TURN_KEY, bytes),
            Err(e) => warn!("{}: could not write handoff: {}", self.me, e),
        }
        self.send(&PeerMessage::Handoff(handoff));
    }

    fn broadcast_snapshot(&mut self) {
        self.sent_sequence += 1;
        let msg = PeerMessage::Snapshot {
            sequence: self.sent_sequence,
            turn_token: self.turn.token(),
            snapshot: self.ledger.snapshot(&self.catalog),
        };
        self.send(&msg);
    }

    fn announce_outcome(&mut self) {
        if let GameStatus::GameOver { winner } = self.turn.status() {
            if !self.outcome_sent {
                self.outcome_sent = true;
                self.outgoing = None;
                self.send(&PeerMessage::GameOutcome { winner });
            }
        }
    }

    fn send<M: Serialize>(&mut self, msg: &M) {
        match message::encode(msg) {
            Ok(bytes) => self.transport.send(bytes),
            Err(e) => warn!("{}: could not send message: {}", self.me, e),
        }
    }

    // === Local player actions ===

    /// Form a compound from exactly `selection`.
    pub fn create_compound(
        &mut self,
        selection: &[ElementId],
    ) -> Result<CompoundId, ActionRejected> {
        self.turn.ensure_can_act()?;
        let compound =
            actions::create_compound(&mut self.turn, &mut self.ledger, &self.catalog, selection)?;
        self.broadcast_snapshot();
        self.announce_outcome();
        Ok(compound)
    }

    /// Run the reaction `selection` satisfies, ending the turn if the
    /// reaction demands it.
    pub fn perform_reaction(
        &mut self,
        selection: &[CompoundId],
    ) -> Result<ReactionOutcome, ActionRejected> {
        self.turn.ensure_can_act()?;
        let outcome =
            actions::perform_reaction(&mut self.turn, &mut self.ledger, &self.catalog, selection)?;
        self.broadcast_snapshot();
        self.announce_outcome();
        if outcome.ends_turn && !self.turn.is_game_over() {
            self.end_turn()?;
        }
        Ok(outcome)
    }

    /// Activate an owned compound. Effects aimed at the opponent have no
    /// ledger to land on here and report `Unapplied`.
    pub fn activate_compound(
        &mut self,
        compound: CompoundId,
    ) -> Result<EffectOutcome, ActionRejected> {
        self.turn.ensure_can_act()?;
        let def = actions::owned_compound(&self.ledger, &self.catalog, compound)?;
        let mut ctx =
            ResolverContext::new(&self.catalog, &mut self.rng, OpponentEffects::ActorOnly);
        let outcome = EffectResolver::apply_compound_effect(&mut ctx, &mut self.ledger, None, def)?;
        self.broadcast_snapshot();
        Ok(outcome)
    }

    /// Discard `selection`, redraw as many, and end the turn.
    pub fn discard_and_redraw(&mut self, selection: &[ElementId]) -> Result<usize, ActionRejected> {
        self.turn.ensure_can_act()?;
        let drawn = self
            .ledger
            .discard_and_redraw(selection, &self.catalog, &mut self.rng)?;
        self.broadcast_snapshot();
        self.end_turn()?;
        Ok(drawn)
    }

    /// Hand the turn to the opponent.
    pub fn end_turn(&mut self) -> Result<TurnToken, ActionRejected> {
        self.turn.ensure_can_act()?;
        let token = self.turn.release_turn(&mut self.ledger);
        let handoff = TurnHandoff {
            turn_owner: self.me.opponent(),
            turn_token: token,
        };
        info!("{}: ending turn, handing {} to {}", self.me, token, handoff.turn_owner);
        self.publish(handoff);
        self.outgoing = Some(Awaiting {
            handoff,
            since: self.tick,
        });
        Ok(token)
    }
}
