//! Card parsing and formatting for two-letter card codes (e.g., "CJ", "ST", "H7")

use std::fmt;
use std::str::FromStr;

use super::cards_types::{Card, CardSlot, Rank, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

pub const HIDDEN_CARD: &str = "??";

fn suit_from_char(ch: char) -> Option<Suit> {
    match ch {
        'C' => Some(Suit::Clubs),
        'S' => Some(Suit::Spades),
        'H' => Some(Suit::Hearts),
        'D' => Some(Suit::Diamonds),
        _ => None,
    }
}

fn rank_from_char(ch: char) -> Option<Rank> {
    match ch {
        '7' => Some(Rank::Seven),
        '8' => Some(Rank::Eight),
        '9' => Some(Rank::Nine),
        'T' => Some(Rank::Ten),
        'J' => Some(Rank::Jack),
        'Q' => Some(Rank::Queen),
        'K' => Some(Rank::King),
        'A' => Some(Rank::Ace),
        _ => None,
    }
}

pub fn suit_char(suit: Suit) -> char {
    match suit {
        Suit::Clubs => 'C',
        Suit::Spades => 'S',
        Suit::Hearts => 'H',
        Suit::Diamonds => 'D',
    }
}

pub fn rank_char(rank: Rank) -> char {
    match rank {
        Rank::Seven => '7',
        Rank::Eight => '8',
        Rank::Nine => '9',
        Rank::Ten => 'T',
        Rank::Jack => 'J',
        Rank::Queen => 'Q',
        Rank::King => 'K',
        Rank::Ace => 'A',
    }
}

impl FromStr for Card {
    type Err = DomainError;

    /// Accepts suit-first (`CJ`) and rank-first (`JC`) codes; the two alphabets are disjoint.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || DomainError::validation(ValidationKind::ParseCard, format!("Parse card: {s}"));
        let mut chars = s.chars();
        let (first, second) = match (chars.next(), chars.next(), chars.next()) {
            (Some(a), Some(b), None) => (a, b),
            _ => return Err(err()),
        };
        if let (Some(suit), Some(rank)) = (suit_from_char(first), rank_from_char(second)) {
            return Ok(Card { suit, rank });
        }
        if let (Some(rank), Some(suit)) = (rank_from_char(first), suit_from_char(second)) {
            return Ok(Card { suit, rank });
        }
        Err(err())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", suit_char(self.suit), rank_char(self.rank))
    }
}

/// Non-panicking helper to parse card tokens into Card instances.
/// Returns Err if any token is invalid.
pub fn try_parse_cards<I, S>(tokens: I) -> Result<Vec<Card>, DomainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|s| s.as_ref().parse::<Card>())
        .collect()
}

/// Parse a wire token into a slot. Never fails: `??` is hidden, anything else
/// that is not a card code is kept as `Unknown`.
pub fn parse_slot(token: &str) -> CardSlot {
    if token == HIDDEN_CARD {
        return CardSlot::Hidden;
    }
    match token.parse::<Card>() {
        Ok(card) => CardSlot::Known(card),
        Err(_) => CardSlot::Unknown(token.to_string()),
    }
}

impl fmt::Display for CardSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardSlot::Known(card) => write!(f, "{card}"),
            CardSlot::Hidden => f.write_str(HIDDEN_CARD),
            CardSlot::Unknown(token) => f.write_str(token),
        }
    }
}

/// Join cards with '.' as the wire protocol lists them.
pub fn format_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(".")
}
