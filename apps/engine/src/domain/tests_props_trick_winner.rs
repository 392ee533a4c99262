/// Property-based tests for trick winner resolution
use proptest::prelude::*;

use crate::domain::state::{resolve_trick_winner, Player, Trick};
use crate::domain::{test_gens, test_prelude, Card, GameType, Rank, Suit};

/// Absolute strength of a card in a trick, written independently of `card_beats`.
fn oracle_strength(game_type: GameType, led: Card, card: Card) -> u32 {
    let plain = |rank: Rank| match rank {
        Rank::Ace => 7,
        Rank::Ten => 6,
        Rank::King => 5,
        Rank::Queen => 4,
        Rank::Nine => 3,
        Rank::Eight => 2,
        Rank::Seven => 1,
        Rank::Jack => 0,
    };
    if game_type == GameType::Null {
        let null = |rank: Rank| rank as u32 + 1;
        return if card.suit == led.suit { 10 + null(card.rank) } else { 0 };
    }
    let jack = |suit: Suit| match suit {
        Suit::Clubs => 4,
        Suit::Spades => 3,
        Suit::Hearts => 2,
        Suit::Diamonds => 1,
    };
    let trump_suit = game_type.trump_suit();
    let trumps = |c: Card| c.rank == Rank::Jack || Some(c.suit) == trump_suit;
    if card.rank == Rank::Jack {
        200 + jack(card.suit)
    } else if Some(card.suit) == trump_suit {
        100 + plain(card.rank)
    } else if !trumps(led) && card.suit == led.suit {
        10 + plain(card.rank)
    } else {
        0
    }
}

fn oracle_winner(game_type: GameType, plays: &[(Player, Card)]) -> Player {
    let led = plays[0].1;
    let mut best = plays[0];
    for &play in &plays[1..] {
        if oracle_strength(game_type, led, play.1) > oracle_strength(game_type, led, best.1) {
            best = play;
        }
    }
    best.0
}

fn build(leader: Player, plays: Vec<(Player, Card)>) -> Trick {
    let mut trick = Trick::new(0, leader);
    trick.plays = plays;
    trick
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// The resolved winner matches an independent strength table for every game type.
    #[test]
    fn prop_trick_winner_matches_oracle(
        (leader, plays) in test_gens::complete_trick(),
        game_type in test_gens::game_type(),
    ) {
        let expected = oracle_winner(game_type, &plays);
        let trick = build(leader, plays.clone());
        let winner = resolve_trick_winner(game_type, &trick);
        prop_assert_eq!(winner, Some(expected),
            "game_type={:?} plays={:?}", game_type, plays);
    }

    /// Swapping the two following plays never changes which card wins.
    #[test]
    fn prop_winning_card_independent_of_follow_order(
        (leader, plays) in test_gens::complete_trick(),
        game_type in test_gens::game_type(),
    ) {
        let winning_card = |plays: &[(Player, Card)]| {
            let trick = build(leader, plays.to_vec());
            let w = resolve_trick_winner(game_type, &trick).unwrap();
            plays.iter().find(|(p, _)| *p == w).unwrap().1
        };
        let mut swapped = plays.clone();
        let (a, b) = (swapped[1].1, swapped[2].1);
        swapped[1].1 = b;
        swapped[2].1 = a;
        prop_assert_eq!(winning_card(&plays), winning_card(&swapped));
    }

    /// A trump always beats every non-trump in trump games.
    #[test]
    fn prop_trump_wins_when_played(
        (leader, plays) in test_gens::complete_trick(),
        game_type in test_gens::announceable_game_type(),
    ) {
        prop_assume!(game_type != GameType::Null);
        let any_trump = plays.iter().any(|&(_, c)| crate::domain::is_trump(game_type, c));
        let trick = build(leader, plays.clone());
        let winner = resolve_trick_winner(game_type, &trick).unwrap();
        let card = plays.iter().find(|(p, _)| *p == winner).unwrap().1;
        if any_trump {
            prop_assert!(crate::domain::is_trump(game_type, card));
        } else {
            prop_assert_eq!(card.suit, plays[0].1.suit);
        }
    }
}

#[test]
fn incomplete_trick_has_no_winner() {
    let mut trick = Trick::new(0, Player::Forehand);
    trick.plays.push((Player::Forehand, Card::new(Suit::Clubs, Rank::Ace)));
    assert_eq!(resolve_trick_winner(GameType::Grand, &trick), None);
}
