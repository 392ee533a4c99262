//! Card game logic: trump membership, card strength per game type, following rules

use super::cards_types::{Card, GameType, Rank, Suit};

/// Whether `card` is a trump in `game_type`.
///
/// Suit games: all Jacks plus the trump suit. Grand, Ramsch and PassedIn: Jacks only.
/// Null: nothing.
pub fn is_trump(game_type: GameType, card: Card) -> bool {
    match game_type {
        GameType::Null => false,
        GameType::Grand | GameType::Ramsch | GameType::PassedIn => card.rank == Rank::Jack,
        GameType::Clubs | GameType::Spades | GameType::Hearts | GameType::Diamonds => {
            card.rank == Rank::Jack || game_type.trump_suit() == Some(card.suit)
        }
    }
}

/// Strength of a card within its following class (trumps, or its own suit).
///
/// Only comparable between cards of the same class; trumps always rank 7..=10
/// (the Jacks) or 0..=6 for trump-suit cards, so the Jacks top every suit card.
pub fn rank_order(game_type: GameType, card: Card) -> u8 {
    if game_type == GameType::Null {
        return match card.rank {
            Rank::Seven => 0,
            Rank::Eight => 1,
            Rank::Nine => 2,
            Rank::Ten => 3,
            Rank::Jack => 4,
            Rank::Queen => 5,
            Rank::King => 6,
            Rank::Ace => 7,
        };
    }
    match card.rank {
        Rank::Jack => 7 + card.suit.jack_order(),
        Rank::Seven => 0,
        Rank::Eight => 1,
        Rank::Nine => 2,
        Rank::Queen => 3,
        Rank::King => 4,
        Rank::Ten => 5,
        Rank::Ace => 6,
    }
}

/// The class a card follows as: `None` for trump, otherwise its suit.
fn follow_class(game_type: GameType, card: Card) -> Option<Suit> {
    if is_trump(game_type, card) {
        None
    } else {
        Some(card.suit)
    }
}

/// Whether the hand holds any card that follows `led`.
pub fn hand_can_follow(game_type: GameType, led: Card, hand: &[Card]) -> bool {
    let class = follow_class(game_type, led);
    hand.iter().any(|&c| follow_class(game_type, c) == class)
}

/// Whether `card` may be played onto a trick led by `led`, given the player's `hand`.
pub fn is_allowed(game_type: GameType, led: Card, card: Card, hand: &[Card]) -> bool {
    if follow_class(game_type, card) == follow_class(game_type, led) {
        return true;
    }
    !hand_can_follow(game_type, led, hand)
}

/// Cards from `hand` that may legally be played. `led` is `None` when leading.
pub fn legal_cards(game_type: GameType, led: Option<Card>, hand: &[Card]) -> Vec<Card> {
    let mut v: Vec<Card> = match led {
        Some(led) => hand
            .iter()
            .copied()
            .filter(|&c| is_allowed(game_type, led, c, hand))
            .collect(),
        None => hand.to_vec(),
    };
    v.sort();
    v
}

/// Whether `a` beats the currently winning card `b` in a trick led by `led`.
pub fn card_beats(game_type: GameType, a: Card, b: Card, led: Card) -> bool {
    let a_trump = is_trump(game_type, a);
    let b_trump = is_trump(game_type, b);
    if a_trump != b_trump {
        return a_trump;
    }
    if a_trump {
        return rank_order(game_type, a) > rank_order(game_type, b);
    }
    // Neither is trump: only cards of the led suit count
    let a_follows = a.suit == led.suit && !is_trump(game_type, led);
    let b_follows = b.suit == led.suit && !is_trump(game_type, led);
    match (a_follows, b_follows) {
        (true, false) => true,
        (false, _) => false,
        (true, true) => rank_order(game_type, a) > rank_order(game_type, b),
    }
}

/// All trumps of a trump game, highest first. Empty for Null.
pub fn trump_order(game_type: GameType) -> Vec<Card> {
    if !game_type.jacks_are_trump() {
        return Vec::new();
    }
    let mut order: Vec<Card> = [Suit::Clubs, Suit::Spades, Suit::Hearts, Suit::Diamonds]
        .into_iter()
        .map(|s| Card::new(s, Rank::Jack))
        .collect();
    if let Some(suit) = game_type.trump_suit() {
        for rank in [
            Rank::Ace,
            Rank::Ten,
            Rank::King,
            Rank::Queen,
            Rank::Nine,
            Rank::Eight,
            Rank::Seven,
        ] {
            order.push(Card::new(suit, rank));
        }
    }
    order
}
