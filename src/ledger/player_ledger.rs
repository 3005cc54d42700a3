//! Per-player mutable state.
//!
//! A `PlayerLedger` holds a hand (an ordered multiset of element types),
//! the compounds the player owns, and the per-turn counters. Fields are
//! private so the hand limit holds after every mutation: every way of
//! adding elements goes through `add_elements`, which silently drops the
//! excess.

use im::Vector;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::cards::{Catalog, CompoundId, ElementId};
use crate::core::{ActionRejected, DealTable, GameRng, PlayerId};
use crate::rules::multiset;

use super::snapshot::LedgerSnapshot;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerLedger {
    player: PlayerId,
    hand_limit: usize,
    hand: Vec<ElementId>,
    /// Owned compound instances; duplicates are separate entries.
    compounds: Vector<CompoundId>,

    has_discarded_this_turn: bool,
    reactions_this_turn: u32,
    /// `None` is unbounded.
    reaction_limit: Option<u32>,

    negate_next_dissolution: bool,
    skip_next_turn: bool,
}

impl PlayerLedger {
    /// Empty ledger, as created at game start before the first deal.
    #[must_use]
    pub fn new(player: PlayerId, hand_limit: usize) -> Self {
        Self {
            player,
            hand_limit,
            hand: Vec::new(),
            compounds: Vector::new(),
            has_discarded_this_turn: false,
            reactions_this_turn: 0,
            reaction_limit: None,
            negate_next_dissolution: false,
            skip_next_turn: false,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    #[must_use]
    pub fn hand(&self) -> &[ElementId] {
        &self.hand
    }

    #[must_use]
    pub fn hand_limit(&self) -> usize {
        self.hand_limit
    }

    /// Free hand slots.
    #[must_use]
    pub fn room(&self) -> usize {
        self.hand_limit.saturating_sub(self.hand.len())
    }

    #[must_use]
    pub fn compounds(&self) -> &Vector<CompoundId> {
        &self.compounds
    }

    #[must_use]
    pub fn compound_count(&self) -> usize {
        self.compounds.len()
    }

    #[must_use]
    pub fn has_discarded_this_turn(&self) -> bool {
        self.has_discarded_this_turn
    }

    #[must_use]
    pub fn reactions_this_turn(&self) -> u32 {
        self.reactions_this_turn
    }

    #[must_use]
    pub fn reaction_limit(&self) -> Option<u32> {
        self.reaction_limit
    }

    /// Another reaction is allowed this turn.
    #[must_use]
    pub fn can_react(&self) -> bool {
        self.reaction_limit
            .map_or(true, |limit| self.reactions_this_turn < limit)
    }

    #[must_use]
    pub fn negates_next_dissolution(&self) -> bool {
        self.negate_next_dissolution
    }

    #[must_use]
    pub fn skips_next_turn(&self) -> bool {
        self.skip_next_turn
    }

    /// Every compound of `selection` is owned, counting duplicates.
    #[must_use]
    pub fn owns_compounds(&self, selection: &[CompoundId]) -> bool {
        let owned: Vec<CompoundId> = self.compounds.iter().copied().collect();
        multiset::is_sub_multiset(selection, &owned)
    }

    #[must_use]
    pub fn holds_elements(&self, selection: &[ElementId]) -> bool {
        multiset::is_sub_multiset(selection, &self.hand)
    }

    // === Hand mutation ===

    /// Append elements up to the hand limit. Returns how many were kept.
    pub fn add_elements(&mut self, elements: impl IntoIterator<Item = ElementId>) -> usize {
        let room = self.room();
        let before = self.hand.len();
        self.hand.extend(elements.into_iter().take(room));
        self.hand.len() - before
    }

    /// Remove one instance of each element. All-or-nothing.
    pub fn remove_elements(&mut self, elements: &[ElementId]) -> bool {
        multiset::remove_each(&mut self.hand, elements)
    }

    /// Remove up to `count` elements from the front of the hand.
    pub fn discard_front(&mut self, count: usize) -> Vec<ElementId> {
        let n = count.min(self.hand.len());
        self.hand.drain(..n).collect()
    }

    /// Remove up to `count` elements chosen at random.
    pub fn discard_random(&mut self, count: usize, rng: &mut GameRng) -> Vec<ElementId> {
        let mut removed = Vec::new();
        for _ in 0..count {
            if self.hand.is_empty() {
                break;
            }
            let idx = rng.gen_index(self.hand.len());
            removed.push(self.hand.remove(idx));
        }
        removed
    }

    /// Draw up to `count` uniformly random elements, with replacement,
    /// stopping at the hand limit. Returns how many were added.
    pub fn draw_random(&mut self, count: usize, catalog: &Catalog, rng: &mut GameRng) -> usize {
        let elements = catalog.elements();
        if elements.is_empty() {
            return 0;
        }
        let n = count.min(self.room());
        for _ in 0..n {
            let idx = rng.gen_index(elements.len());
            self.hand.push(elements[idx].id);
        }
        n
    }

    pub fn swap_hands(&mut self, other: &mut PlayerLedger) {
        std::mem::swap(&mut self.hand, &mut other.hand);
        // Limits are per-player; trim if the incoming hand is too large.
        self.hand.truncate(self.hand_limit);
        other.hand.truncate(other.hand_limit);
    }

    // === Compounds ===

    pub fn add_compound(&mut self, compound: CompoundId) {
        self.compounds.push_back(compound);
    }

    /// Remove one owned instance. Returns `false` if none is owned.
    pub fn remove_compound(&mut self, compound: CompoundId) -> bool {
        match self.compounds.index_of(&compound) {
            Some(idx) => {
                self.compounds.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Remove up to `count` compounds, most recent first.
    pub fn remove_latest_compounds(&mut self, count: usize) -> Vec<CompoundId> {
        let mut removed = Vec::new();
        for _ in 0..count {
            match self.compounds.pop_back() {
                Some(c) => removed.push(c),
                None => break,
            }
        }
        removed
    }

    // === Counters and flags ===

    pub(crate) fn record_reaction(&mut self, limit_override: Option<u32>) {
        self.reactions_this_turn += 1;
        if let Some(limit) = limit_override {
            self.reaction_limit = Some(limit);
        }
    }

    pub(crate) fn set_negate_next_dissolution(&mut self, value: bool) {
        self.negate_next_dissolution = value;
    }

    pub(crate) fn set_skip_next_turn(&mut self, value: bool) {
        self.skip_next_turn = value;
    }

    /// Clear the per-turn counters of the player whose turn just ended.
    pub fn reset_turn(&mut self) {
        self.has_discarded_this_turn = false;
        self.reactions_this_turn = 0;
        self.reaction_limit = None;
    }

    // === Turn-level operations ===

    /// Turn-start deal: add elements by the tier table, capped at the limit.
    /// Returns how many were added.
    pub fn deal_elements(
        &mut self,
        catalog: &Catalog,
        rng: &mut GameRng,
        table: &DealTable,
    ) -> usize {
        let wanted = table.elements_for(self.hand.len());
        let added = self.draw_random(wanted, catalog, rng);
        debug!(
            "{} dealt {} of {} (hand {}/{})",
            self.player,
            added,
            wanted,
            self.hand.len(),
            self.hand_limit
        );
        added
    }

    /// Discard `selection` and draw as many fresh elements, once per turn.
    ///
    /// The caller ends the turn afterwards; this only touches the ledger.
    /// Returns the number of elements redrawn.
    pub fn discard_and_redraw(
        &mut self,
        selection: &[ElementId],
        catalog: &Catalog,
        rng: &mut GameRng,
    ) -> Result<usize, ActionRejected> {
        if self.has_discarded_this_turn {
            return Err(ActionRejected::AlreadyDiscarded);
        }
        if selection.is_empty() {
            return Err(ActionRejected::EmptySelection);
        }
        if !self.remove_elements(selection) {
            return Err(ActionRejected::NotInHand);
        }
        let drawn = self.draw_random(selection.len(), catalog, rng);
        self.has_discarded_this_turn = true;
        debug!("{} discarded and redrew {}", self.player, drawn);
        Ok(drawn)
    }

    /// Counts-only projection sent to the opponent.
    #[must_use]
    pub fn snapshot(&self, catalog: &Catalog) -> LedgerSnapshot {
        LedgerSnapshot {
            hand_count: self.hand.len() as u32,
            owned_formulas: self
                .compounds
                .iter()
                .map(|c| catalog.formula(*c).to_string())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::standard;

    fn ledger() -> PlayerLedger {
        PlayerLedger::new(PlayerId::FIRST, 10)
    }

    #[test]
    fn test_new_ledger_is_empty() {
        let l = ledger();
        assert!(l.hand().is_empty());
        assert_eq!(l.compound_count(), 0);
        assert!(l.can_react());
        assert_eq!(l.reaction_limit(), None);
    }

    #[test]
    fn test_deal_tiers() {
        let catalog = standard::catalog();
        let mut rng = GameRng::new(1);
        let mut l = ledger();

        assert_eq!(l.deal_elements(&catalog, &mut rng, &DealTable::STANDARD), 5);
        assert_eq!(l.deal_elements(&catalog, &mut rng, &DealTable::STANDARD), 4);
        assert_eq!(l.hand().len(), 9);
        // Three wanted, one slot left.
        assert_eq!(l.deal_elements(&catalog, &mut rng, &DealTable::STANDARD), 1);
        assert_eq!(l.hand().len(), 10);
        assert_eq!(l.deal_elements(&catalog, &mut rng, &DealTable::STANDARD), 0);
    }

    #[test]
    fn test_add_elements_caps_at_limit() {
        let mut l = PlayerLedger::new(PlayerId::FIRST, 3);
        let kept = l.add_elements(vec![ElementId::new(0); 5]);
        assert_eq!(kept, 3);
        assert_eq!(l.hand().len(), 3);
    }

    #[test]
    fn test_discard_and_redraw_keeps_count_and_is_once_per_turn() {
        let catalog = standard::catalog();
        let mut rng = GameRng::new(5);
        let mut l = ledger();
        l.deal_elements(&catalog, &mut rng, &DealTable::STANDARD);

        let selection = l.hand()[..2].to_vec();
        assert_eq!(l.discard_and_redraw(&selection, &catalog, &mut rng), Ok(2));
        assert_eq!(l.hand().len(), 5);
        assert!(l.has_discarded_this_turn());

        let again = l.hand()[..1].to_vec();
        assert_eq!(
            l.discard_and_redraw(&again, &catalog, &mut rng),
            Err(ActionRejected::AlreadyDiscarded)
        );

        l.reset_turn();
        assert!(!l.has_discarded_this_turn());
    }

    #[test]
    fn test_discard_rejects_bad_selection_without_mutation() {
        let catalog = standard::catalog();
        let mut rng = GameRng::new(5);
        let mut l = ledger();
        l.add_elements([ElementId::new(0), ElementId::new(1)]);
        let before = l.clone();

        assert_eq!(
            l.discard_and_redraw(&[], &catalog, &mut rng),
            Err(ActionRejected::EmptySelection)
        );
        assert_eq!(
            l.discard_and_redraw(&[ElementId::new(0), ElementId::new(0)], &catalog, &mut rng),
            Err(ActionRejected::NotInHand)
        );
        assert_eq!(l, before);
    }

    #[test]
    fn test_compound_ownership_counts_duplicates() {
        let mut l = ledger();
        let water = CompoundId::new(0);
        l.add_compound(water);
        l.add_compound(water);

        assert!(l.owns_compounds(&[water, water]));
        assert!(!l.owns_compounds(&[water, water, water]));
        assert!(l.remove_compound(water));
        assert_eq!(l.compound_count(), 1);
        assert!(!l.remove_compound(CompoundId::new(3)));
    }

    #[test]
    fn test_reaction_limit_tracking() {
        let mut l = ledger();
        l.record_reaction(Some(1));
        assert_eq!(l.reactions_this_turn(), 1);
        assert_eq!(l.reaction_limit(), Some(1));
        assert!(!l.can_react());

        l.reset_turn();
        assert!(l.can_react());
        assert_eq!(l.reaction_limit(), None);
    }

    #[test]
    fn test_snapshot_hides_hand_contents() {
        let catalog = standard::catalog();
        let mut l = ledger();
        l.add_elements([ElementId::new(0), ElementId::new(2)]);
        l.add_compound(catalog.compound_by_formula("H2O").unwrap().id);

        let snap = l.snapshot(&catalog);
        assert_eq!(snap.hand_count, 2);
        assert_eq!(snap.owned_formulas, vec!["H2O".to_string()]);
    }
}
