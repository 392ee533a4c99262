/// Property-based tests for following rules
use std::collections::HashSet;

use proptest::prelude::*;

use crate::domain::cards_logic::hand_can_follow;
use crate::domain::{is_trump, legal_cards, test_gens, test_prelude, Card};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Legal plays are a non-empty, duplicate-free subset of a non-empty hand.
    #[test]
    fn prop_legal_plays_subset(
        cards in test_gens::unique_cards(11),
        game_type in test_gens::game_type(),
        lead in any::<bool>(),
    ) {
        let led = lead.then_some(cards[0]);
        let hand = &cards[1..];
        let legal = legal_cards(game_type, led, hand);

        prop_assert!(!legal.is_empty(), "a non-empty hand always has a legal card");
        let set: HashSet<Card> = legal.iter().copied().collect();
        prop_assert_eq!(set.len(), legal.len());
        for card in &legal {
            prop_assert!(hand.contains(card), "legal card {:?} must be in hand", card);
        }
        if led.is_none() {
            prop_assert_eq!(legal.len(), hand.len());
        }
    }

    /// When the hand can follow, every legal card follows; when it cannot, every card is legal.
    #[test]
    fn prop_follow_class_respected(
        cards in test_gens::unique_cards(8),
        game_type in test_gens::game_type(),
    ) {
        let led = cards[0];
        let hand = &cards[1..];
        let legal = legal_cards(game_type, Some(led), hand);
        let class = |c: Card| if is_trump(game_type, c) { None } else { Some(c.suit) };

        if hand_can_follow(game_type, led, hand) {
            for card in &legal {
                prop_assert_eq!(class(*card), class(led),
                    "{:?} does not follow {:?} in {:?}", card, led, game_type);
            }
            let following = hand.iter().filter(|&&c| class(c) == class(led)).count();
            prop_assert_eq!(legal.len(), following);
        } else {
            prop_assert_eq!(legal.len(), hand.len());
        }
    }
}
