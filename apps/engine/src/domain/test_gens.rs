// Proptest generators for domain types.
// Cards are drawn without replacement so hands and tricks never repeat a card.

use proptest::prelude::*;

use crate::domain::announcement::GameAnnouncement;
use crate::domain::cards_types::{Card, GameType, Rank, Suit};
use crate::domain::dealing::full_deck;
use crate::domain::state::Player;

pub fn suit() -> impl Strategy<Value = Suit> {
    prop_oneof![
        Just(Suit::Clubs),
        Just(Suit::Spades),
        Just(Suit::Hearts),
        Just(Suit::Diamonds),
    ]
}

pub fn rank() -> impl Strategy<Value = Rank> {
    proptest::sample::select(Rank::ALL.to_vec())
}

pub fn card() -> impl Strategy<Value = Card> {
    (suit(), rank()).prop_map(|(suit, rank)| Card { suit, rank })
}

pub fn player() -> impl Strategy<Value = Player> {
    proptest::sample::select(Player::ALL.to_vec())
}

/// Any game type that is played with tricks.
pub fn game_type() -> impl Strategy<Value = GameType> {
    prop_oneof![
        Just(GameType::Clubs),
        Just(GameType::Spades),
        Just(GameType::Hearts),
        Just(GameType::Diamonds),
        Just(GameType::Grand),
        Just(GameType::Null),
        Just(GameType::Ramsch),
    ]
}

/// Game types a declarer can announce.
pub fn announceable_game_type() -> impl Strategy<Value = GameType> {
    prop_oneof![
        Just(GameType::Clubs),
        Just(GameType::Spades),
        Just(GameType::Hearts),
        Just(GameType::Diamonds),
        Just(GameType::Grand),
        Just(GameType::Null),
    ]
}

/// N unique cards from the Skat deck.
pub fn unique_cards(count: usize) -> impl Strategy<Value = Vec<Card>> {
    Just(()).prop_perturb(move |_, mut rng| {
        let mut all_cards = full_deck();
        for i in 0..count.min(all_cards.len()) {
            let j = rng.random_range(i..all_cards.len());
            all_cards.swap(i, j);
        }
        all_cards.truncate(count);
        all_cards
    })
}

/// Complete trick: leader plus three unique plays in seat order.
pub fn complete_trick() -> impl Strategy<Value = (Player, Vec<(Player, Card)>)> {
    (player(), unique_cards(3)).prop_map(|(leader, cards)| {
        let mut seat = leader;
        let mut plays = Vec::with_capacity(3);
        for card in cards {
            plays.push((seat, card));
            seat = seat.left_neighbour();
        }
        (leader, plays)
    })
}

/// Announcements that pass validation, including discards for non-hand games.
pub fn valid_announcement() -> impl Strategy<Value = GameAnnouncement> {
    (
        announceable_game_type(),
        any::<bool>(),
        any::<bool>(),
        0u8..3,
        unique_cards(2),
    )
        .prop_map(|(gt, hand, ouvert, level, discards)| {
            let mut a = GameAnnouncement::new(gt);
            if gt == GameType::Null {
                a.hand = hand;
                a.ouvert = ouvert;
            } else if ouvert {
                a = a.ouvert().normalized();
            } else if hand {
                a.hand = true;
                a.schneider = level >= 1;
                a.schwarz = level >= 2;
            }
            if !a.hand {
                a = a.with_discards(discards);
            }
            a
        })
}
