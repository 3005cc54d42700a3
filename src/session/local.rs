//! Single-peer play against the simulated opponent.
//!
//! Both ledgers live here. The human always sits at `PlayerId::FIRST`
//! and the coordinator is kept from the human's point of view, so
//! `TurnOwner::Local` is the human's turn.
//!
//! ## Turn flow
//!
//! ```text
//! start ─▶ [deal ─▶ act* ─▶ end_turn] ─▶ [deal ─▶ opponent ─▶ flip] ─▶ ...
//! ```
//!
//! With `opponent_think_ticks == 0` the opponent's turn runs inside
//! `end_turn`; otherwise it runs from `tick` once the think time elapses.

use log::{debug, info};

use crate::cards::{Catalog, CompoundId, ElementId};
use crate::core::{ActionRejected, ConfigError, GameConfig, GameRng, PlayerId, PlayerMap};
use crate::effects::{EffectOutcome, EffectResolver, ReactionOutcome, ResolverContext};
use crate::ledger::{LedgerSnapshot, PlayerLedger};
use crate::turn::{GameStatus, TurnCoordinator, TurnOwner, TurnToken};

use super::actions;
use super::opponent::SimpleOpponent;

/// A complete game between one local player and `SimpleOpponent`.
pub struct LocalGame {
    catalog: Catalog,
    config: GameConfig,
    ledgers: PlayerMap<PlayerLedger>,
    turn: TurnCoordinator,
    rng: GameRng,
    opponent: SimpleOpponent,
    tick: u64,
    opponent_ready_at: Option<u64>,
}

impl LocalGame {
    /// Seat of the local player.
    pub const HUMAN: PlayerId = PlayerId::FIRST;
    /// Seat of the simulated opponent.
    pub const OPPONENT: PlayerId = PlayerId::SECOND;

    pub fn new(catalog: Catalog, config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let hand_limit = config.hand_limit;
        Ok(Self {
            ledgers: PlayerMap::new(|p| PlayerLedger::new(p, hand_limit)),
            turn: TurnCoordinator::new(Self::HUMAN, config.win_condition),
            rng: GameRng::new(config.seed),
            opponent: SimpleOpponent,
            tick: 0,
            opponent_ready_at: None,
            catalog,
            config,
        })
    }

    // === Queries ===

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn ledger(&self, player: PlayerId) -> &PlayerLedger {
        &self.ledgers[player]
    }

    #[must_use]
    pub fn turn(&self) -> &TurnCoordinator {
        &self.turn
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.turn.status()
    }

    /// Seat whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> Option<PlayerId> {
        self.turn.current_player()
    }

    /// What the local player is allowed to see of the opponent.
    #[must_use]
    pub fn opponent_view(&self) -> LedgerSnapshot {
        self.ledgers[Self::OPPONENT].snapshot(&self.catalog)
    }

    /// Whether the opponent's delayed turn is still pending.
    #[must_use]
    pub fn opponent_thinking(&self) -> bool {
        self.opponent_ready_at.is_some()
    }

    // === Turn flow ===

    /// Begin the game with `first` to move.
    pub fn start(&mut self, first: PlayerId) {
        let owner = TurnOwner::seen_by(first, Self::HUMAN);
        if self.turn.commit(owner, TurnToken(1)) {
            info!("local game started, {} moves first", first);
            self.start_turn();
        }
    }

    /// Advance the clock by one tick.
    pub fn tick(&mut self) {
        self.tick += 1;
        if let Some(ready_at) = self.opponent_ready_at {
            if self.tick >= ready_at {
                self.opponent_ready_at = None;
                self.run_opponent_turn();
            }
        }
    }

    /// End the local player's turn.
    pub fn end_turn(&mut self) -> Result<TurnToken, ActionRejected> {
        self.turn.ensure_can_act()?;
        let token = self.turn.end_turn(&mut self.ledgers[Self::HUMAN]);
        self.start_turn();
        Ok(token)
    }

    fn start_turn(&mut self) {
        if self.turn.is_game_over() {
            return;
        }
        let Some(player) = self.turn.current_player() else {
            return;
        };

        let ledger = &mut self.ledgers[player];
        if ledger.skips_next_turn() {
            ledger.set_skip_next_turn(false);
            info!("{} skips a turn", player);
            self.turn.end_turn(&mut self.ledgers[player]);
            self.start_turn();
            return;
        }

        let dealt = ledger.deal_elements(&self.catalog, &mut self.rng, &self.config.deal_table);
        debug!("{} dealt {} at turn {}", player, dealt, self.turn.token());
        self.turn.begin_acting();

        if player == Self::OPPONENT {
            match self.config.opponent_think_ticks {
                0 => self.run_opponent_turn(),
                ticks => self.opponent_ready_at = Some(self.tick + u64::from(ticks)),
            }
        }
    }

    fn run_opponent_turn(&mut self) {
        if self.turn.is_game_over() || self.turn.current_player() != Some(Self::OPPONENT) {
            return;
        }
        let ledger = &mut self.ledgers[Self::OPPONENT];
        if self.opponent.take_turn(ledger, &self.catalog).is_some() {
            self.turn.check_win(Self::OPPONENT, ledger.compound_count());
        }
        if self.turn.is_game_over() {
            return;
        }
        self.turn.end_turn(&mut self.ledgers[Self::OPPONENT]);
        self.start_turn();
    }

    // === Local player actions ===

    /// Form a compound from exactly `selection`.
    pub fn create_compound(
        &mut self,
        selection: &[ElementId],
    ) -> Result<CompoundId, ActionRejected> {
        self.turn.ensure_can_act()?;
        actions::create_compound(
            &mut self.turn,
            &mut self.ledgers[Self::HUMAN],
            &self.catalog,
            selection,
        )
    }

    /// Run the reaction `selection` satisfies. A reaction that forcibly
    /// ends the turn hands the turn over before returning.
    pub fn perform_reaction(
        &mut self,
        selection: &[CompoundId],
    ) -> Result<ReactionOutcome, ActionRejected> {
        self.turn.ensure_can_act()?;
        let outcome = actions::perform_reaction(
            &mut self.turn,
            &mut self.ledgers[Self::HUMAN],
            &self.catalog,
            selection,
        )?;
        if outcome.ends_turn && !self.turn.is_game_over() {
            self.end_turn()?;
        }
        Ok(outcome)
    }

    /// Activate an owned compound's effect.
    pub fn activate_compound(
        &mut self,
        compound: CompoundId,
    ) -> Result<EffectOutcome, ActionRejected> {
        self.turn.ensure_can_act()?;
        let def = actions::owned_compound(&self.ledgers[Self::HUMAN], &self.catalog, compound)?;
        let (mine, theirs) = self.ledgers.pair_mut(Self::HUMAN);
        let mut ctx =
            ResolverContext::new(&self.catalog, &mut self.rng, self.config.opponent_effects);
        EffectResolver::apply_compound_effect(&mut ctx, mine, Some(theirs), def)
    }

    /// Discard `selection`, redraw as many, and end the turn.
    pub fn discard_and_redraw(&mut self, selection: &[ElementId]) -> Result<usize, ActionRejected> {
        self.turn.ensure_can_act()?;
        let drawn =
            self.ledgers[Self::HUMAN].discard_and_redraw(selection, &self.catalog, &mut self.rng)?;
        self.end_turn()?;
        Ok(drawn)
    }
}
