//! Effect resolution: applying matches and compound effects to ledgers.
//!
//! The resolver trusts its inputs the way the matcher does: callers check
//! turn ownership and compound possession first. What it does guard is
//! the ledger invariants: hands never go negative or over the limit, and
//! the reaction cap is checked before a reaction is applied.

use log::{debug, info};

use crate::cards::{Catalog, Compound, CompoundEffect, CompoundId, Reaction};
use crate::core::{ActionRejected, GameRng, OpponentEffects};
use crate::ledger::PlayerLedger;
use crate::rules::CompoundMatch;

/// Shared inputs for resolving compound effects.
pub struct ResolverContext<'a> {
    pub catalog: &'a Catalog,
    pub rng: &'a mut GameRng,
    pub opponent_effects: OpponentEffects,
}

impl<'a> ResolverContext<'a> {
    pub fn new(
        catalog: &'a Catalog,
        rng: &'a mut GameRng,
        opponent_effects: OpponentEffects,
    ) -> Self {
        Self {
            catalog,
            rng,
            opponent_effects,
        }
    }
}

/// Result of activating a compound effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectOutcome {
    /// The effect ran.
    Applied,
    /// Opponent-targeting effect with no opponent ledger to mutate.
    Unapplied,
    /// A dissolution hit the opponent's shield, which is now spent.
    Negated,
}

/// Result of applying a reaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReactionOutcome {
    pub compounds_produced: usize,
    pub elements_kept: usize,
    pub elements_dropped: usize,
    /// The turn must end right after this reaction.
    pub ends_turn: bool,
}

/// Applies compound creations, reactions and compound effects.
pub struct EffectResolver;

impl EffectResolver {
    /// Take the matched elements out of the hand and add the compound.
    ///
    /// Fails with `NotInHand`, touching nothing, if the hand does not hold
    /// every consumed element.
    pub fn apply_compound_creation(
        ledger: &mut PlayerLedger,
        found: &CompoundMatch,
    ) -> Result<(), ActionRejected> {
        if !ledger.remove_elements(&found.consumed) {
            return Err(ActionRejected::NotInHand);
        }
        ledger.add_compound(found.compound);
        Ok(())
    }

    /// Run a reaction on the consumed compound instances.
    pub fn apply_reaction(
        ledger: &mut PlayerLedger,
        reaction: &Reaction,
        consumed: &[CompoundId],
    ) -> Result<ReactionOutcome, ActionRejected> {
        if !ledger.can_react() {
            return Err(ActionRejected::ReactionLimitReached {
                limit: ledger.reaction_limit().unwrap_or_default(),
            });
        }
        if !ledger.owns_compounds(consumed) {
            return Err(ActionRejected::CompoundNotOwned(reaction.name.clone()));
        }

        if reaction.banish_reactants {
            for compound in consumed {
                ledger.remove_compound(*compound);
            }
        }
        for compound in &reaction.produced_compounds {
            ledger.add_compound(*compound);
        }
        let elements_kept = ledger.add_elements(reaction.produced_elements.iter().copied());
        ledger.record_reaction(reaction.reaction_limit_override);

        let outcome = ReactionOutcome {
            compounds_produced: reaction.produced_compounds.len(),
            elements_kept,
            elements_dropped: reaction.produced_elements.len() - elements_kept,
            ends_turn: reaction.forcibly_ends_turn,
        };
        debug!("{} ran {}: {:?}", ledger.player(), reaction.name, outcome);
        Ok(outcome)
    }

    /// Activate an owned compound's effect.
    ///
    /// `opponent` is `None` when the opponent ledger is not held locally.
    /// Once-per-turn compounds are removed from the ledger afterwards.
    pub fn apply_compound_effect(
        ctx: &mut ResolverContext,
        ledger: &mut PlayerLedger,
        opponent: Option<&mut PlayerLedger>,
        compound: &Compound,
    ) -> Result<EffectOutcome, ActionRejected> {
        if compound.effect == CompoundEffect::None {
            return Err(ActionRejected::NoEffect(compound.formula.clone()));
        }

        let opponent = match ctx.opponent_effects {
            OpponentEffects::Apply => opponent,
            OpponentEffects::ActorOnly => None,
        };

        let outcome = match (compound.effect, opponent) {
            (CompoundEffect::None, _) => EffectOutcome::Unapplied,

            (CompoundEffect::DrawElements(n), _) => {
                ledger.draw_random(n as usize, ctx.catalog, ctx.rng);
                EffectOutcome::Applied
            }

            (CompoundEffect::ReceiveElements { element, count }, _) => {
                ledger.add_elements(std::iter::repeat(element).take(count as usize));
                EffectOutcome::Applied
            }

            (CompoundEffect::NegateNextDissolution, _) => {
                ledger.set_negate_next_dissolution(true);
                EffectOutcome::Applied
            }

            (CompoundEffect::DiscardAndRedraw(n), _) => {
                let discarded = ledger.discard_front(n as usize).len();
                ledger.draw_random(discarded, ctx.catalog, ctx.rng);
                EffectOutcome::Applied
            }

            (effect, None) => {
                debug_assert!(effect.targets_opponent());
                EffectOutcome::Unapplied
            }

            (CompoundEffect::SkipOpponentTurn, Some(opp)) => {
                opp.set_skip_next_turn(true);
                EffectOutcome::Applied
            }

            (CompoundEffect::ForceOpponentDiscard(n), Some(opp)) => {
                opp.discard_random(n as usize, ctx.rng);
                EffectOutcome::Applied
            }

            (CompoundEffect::SwapHands, Some(opp)) => {
                ledger.swap_hands(opp);
                EffectOutcome::Applied
            }

            (CompoundEffect::DissolveOpponentCompounds(n), Some(opp)) => {
                if opp.negates_next_dissolution() {
                    opp.set_negate_next_dissolution(false);
                    EffectOutcome::Negated
                } else {
                    opp.remove_latest_compounds(n as usize);
                    EffectOutcome::Applied
                }
            }
        };

        if compound.once_per_turn {
            ledger.remove_compound(compound.id);
        }

        info!("{} activated {}: {:?}", ledger.player(), compound, outcome);
        Ok(outcome)
    }
}
