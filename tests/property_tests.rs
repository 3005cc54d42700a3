//! Property tests for ledger and matcher invariants.

use compound_ccg::cards::ElementId;
use compound_ccg::core::{DealTable, GameRng, PlayerId};
use compound_ccg::effects::EffectResolver;
use compound_ccg::games::standard;
use compound_ccg::ledger::PlayerLedger;
use compound_ccg::rules::multiset::is_sub_multiset;
use compound_ccg::rules::{find_compound, first_available_compound};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_deal_never_exceeds_limit(
        seed in any::<u64>(),
        limit in 1usize..16,
        turns in 1usize..30,
    ) {
        let catalog = standard::catalog();
        let mut rng = GameRng::new(seed);
        let mut ledger = PlayerLedger::new(PlayerId::FIRST, limit);

        let mut previous = 0;
        for _ in 0..turns {
            let added = ledger.deal_elements(&catalog, &mut rng, &DealTable::STANDARD);
            let size = ledger.hand().len();
            prop_assert!(size <= limit);
            prop_assert_eq!(size, previous + added);
            prop_assert!(size >= previous);
            previous = size;
        }
    }

    #[test]
    fn prop_discard_preserves_hand_size(seed in any::<u64>(), mask in any::<u16>()) {
        let catalog = standard::catalog();
        let mut rng = GameRng::new(seed);
        let mut ledger = PlayerLedger::new(PlayerId::SECOND, 10);
        ledger.deal_elements(&catalog, &mut rng, &DealTable::STANDARD);
        ledger.deal_elements(&catalog, &mut rng, &DealTable::STANDARD);

        let hand = ledger.hand().to_vec();
        let selection: Vec<ElementId> = hand
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, e)| *e)
            .collect();
        prop_assume!(!selection.is_empty());

        prop_assert_eq!(
            ledger.discard_and_redraw(&selection, &catalog, &mut rng),
            Ok(selection.len())
        );
        prop_assert_eq!(ledger.hand().len(), hand.len());
        prop_assert!(ledger.has_discarded_this_turn());
    }

    #[test]
    fn prop_matches_consume_only_selected_cards(picks in prop::collection::vec(0u16..17, 0..10)) {
        let catalog = standard::catalog();
        let selection: Vec<ElementId> = picks.into_iter().map(ElementId).collect();

        if let Some(found) = find_compound(&selection, &catalog) {
            prop_assert!(!found.consumed.is_empty());
            prop_assert!(is_sub_multiset(found.consumed.as_slice(), &selection));
        }
        if let Some(found) = first_available_compound(&selection, &catalog) {
            prop_assert!(is_sub_multiset(found.consumed.as_slice(), &selection));
        }
    }

    #[test]
    fn prop_creation_keeps_cards_conserved(seed in any::<u64>()) {
        let catalog = standard::catalog();
        let mut rng = GameRng::new(seed);
        let mut ledger = PlayerLedger::new(PlayerId::FIRST, 10);
        ledger.deal_elements(&catalog, &mut rng, &DealTable::STANDARD);
        ledger.deal_elements(&catalog, &mut rng, &DealTable::STANDARD);

        let before = ledger.hand().len();
        if let Some(found) = first_available_compound(ledger.hand(), &catalog) {
            EffectResolver::apply_compound_creation(&mut ledger, &found).unwrap();
            prop_assert_eq!(ledger.hand().len() + found.consumed.len(), before);
            prop_assert_eq!(ledger.compound_count(), 1);
        }
    }
}
