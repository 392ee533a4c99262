//! Core card-related types: Card, Rank, Suit, GameType, CardSlot

use crate::errors::domain::{DomainError, ValidationKind};

/// The four Skat suits, declared from highest to lowest (Clubs > Spades > Hearts > Diamonds).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Suit {
    Clubs,
    Spades,
    Hearts,
    Diamonds,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Spades, Suit::Hearts, Suit::Diamonds];

    /// Position of the suit's Jack among the trump Jacks (Diamonds 0 .. Clubs 3).
    pub fn jack_order(self) -> u8 {
        match self {
            Suit::Diamonds => 0,
            Suit::Hearts => 1,
            Suit::Spades => 2,
            Suit::Clubs => 3,
        }
    }
}

// Suits sort by their Skat precedence, lowest first.
impl Ord for Suit {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.jack_order().cmp(&other.jack_order())
    }
}

impl PartialOrd for Suit {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Card ranks of the 32-card Skat deck.
///
/// Declaration order is the Null ordering (7 < 8 < 9 < 10 < J < Q < K < A).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Rank {
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 8] = [
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// Card point value; independent of the game type.
    pub fn points(self) -> u8 {
        match self.rank {
            Rank::Seven | Rank::Eight | Rank::Nine => 0,
            Rank::Ten => 10,
            Rank::Jack => 2,
            Rank::Queen => 3,
            Rank::King => 4,
            Rank::Ace => 11,
        }
    }
}

// Note: Ord/Eq on Card is only for stable sorting: suit precedence then Null rank order.
// Do not use for trick resolution; see `cards_logic::rank_order`.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.suit.cmp(&other.suit) {
            std::cmp::Ordering::Equal => self.rank.cmp(&other.rank),
            ord => ord,
        }
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Sum of card points.
pub fn card_points(cards: &[Card]) -> u8 {
    cards.iter().map(|c| c.points()).sum()
}

/// The game variants. Determines trump set and card ordering.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum GameType {
    Clubs,
    Spades,
    Hearts,
    Diamonds,
    Grand,
    Null,
    Ramsch,
    PassedIn,
}

impl GameType {
    pub fn trump_suit(self) -> Option<Suit> {
        Suit::try_from(self).ok()
    }

    pub fn is_suit_game(self) -> bool {
        self.trump_suit().is_some()
    }

    /// Suit and Grand games: the declarer plays for card points and is priced by matadors.
    pub fn is_trump_game(self) -> bool {
        self.is_suit_game() || self == GameType::Grand
    }

    /// Whether the four Jacks are trumps in this game type.
    pub fn jacks_are_trump(self) -> bool {
        !matches!(self, GameType::Null)
    }

    /// Game types a declarer may announce.
    pub fn is_announceable(self) -> bool {
        !matches!(self, GameType::Ramsch | GameType::PassedIn)
    }
}

impl From<Suit> for GameType {
    fn from(suit: Suit) -> Self {
        match suit {
            Suit::Clubs => GameType::Clubs,
            Suit::Spades => GameType::Spades,
            Suit::Hearts => GameType::Hearts,
            Suit::Diamonds => GameType::Diamonds,
        }
    }
}

impl TryFrom<GameType> for Suit {
    type Error = DomainError;

    fn try_from(game_type: GameType) -> Result<Self, Self::Error> {
        match game_type {
            GameType::Clubs => Ok(Suit::Clubs),
            GameType::Spades => Ok(Suit::Spades),
            GameType::Hearts => Ok(Suit::Hearts),
            GameType::Diamonds => Ok(Suit::Diamonds),
            other => Err(DomainError::validation(
                ValidationKind::InvalidTrumpConversion,
                format!("{other:?} has no trump suit"),
            )),
        }
    }
}

/// A card position as it arrives over the wire.
///
/// `Hidden` is a card the viewer is not allowed to see (`??`); `Unknown` keeps a
/// malformed code so callers can tell data loss apart from hidden information.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum CardSlot {
    Known(Card),
    Hidden,
    Unknown(String),
}

impl CardSlot {
    pub fn card(&self) -> Option<Card> {
        match self {
            CardSlot::Known(card) => Some(*card),
            CardSlot::Hidden | CardSlot::Unknown(_) => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, CardSlot::Unknown(_))
    }
}

impl From<Card> for CardSlot {
    fn from(card: Card) -> Self {
        CardSlot::Known(card)
    }
}

/// Known cards of a slot list, in order.
pub fn known_cards(slots: &[CardSlot]) -> Vec<Card> {
    slots.iter().filter_map(CardSlot::card).collect()
}
