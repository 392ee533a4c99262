//! Game announcement tokens: `<T>[O][H][S][Z][.cards]`.
//!
//! `T` is one of `G C S H D N`. For ouvert games the cards after the type are
//! the declarer's open hand; otherwise, for non-hand games, the first two are
//! the discarded skat.

use tracing::warn;

use crate::domain::announcement::GameAnnouncement;
use crate::domain::cards_parsing::parse_slot;
use crate::domain::cards_types::{CardSlot, GameType};
use crate::errors::decode::DecodeError;

/// A decoded announcement with the open hand shown alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedAnnouncement {
    pub announcement: GameAnnouncement,
    pub ouvert_cards: Vec<CardSlot>,
    /// Some listed card could not be decoded and is kept as `CardSlot::Unknown`.
    pub degraded: bool,
}

fn game_type_from_char(ch: char) -> Option<GameType> {
    match ch {
        'G' => Some(GameType::Grand),
        'C' => Some(GameType::Clubs),
        'S' => Some(GameType::Spades),
        'H' => Some(GameType::Hearts),
        'D' => Some(GameType::Diamonds),
        'N' => Some(GameType::Null),
        _ => None,
    }
}

fn game_type_char(game_type: GameType) -> Option<char> {
    match game_type {
        GameType::Grand => Some('G'),
        GameType::Clubs => Some('C'),
        GameType::Spades => Some('S'),
        GameType::Hearts => Some('H'),
        GameType::Diamonds => Some('D'),
        GameType::Null => Some('N'),
        GameType::Ramsch | GameType::PassedIn => None,
    }
}

pub fn decode_announcement(token: &str) -> Result<DecodedAnnouncement, DecodeError> {
    let mut parts = token.split('.');
    let head = parts.next().unwrap_or_default();
    let mut chars = head.chars();
    let game_type = chars
        .next()
        .and_then(game_type_from_char)
        .ok_or_else(|| DecodeError::unrecognized(token))?;

    let mut announcement = GameAnnouncement::new(game_type);
    for modifier in chars {
        match modifier {
            'O' => announcement.ouvert = true,
            'H' => announcement.hand = true,
            'S' => announcement.schneider = true,
            'Z' => announcement.schwarz = true,
            _ => return Err(DecodeError::unrecognized(token)),
        }
    }

    let mut cards: Vec<CardSlot> = parts.filter(|p| !p.is_empty()).map(parse_slot).collect();
    let degraded = cards.iter().any(CardSlot::is_unknown);
    if degraded {
        warn!(token, "unknown card code in announcement");
    }

    let mut ouvert_cards = Vec::new();
    if announcement.ouvert {
        ouvert_cards = cards;
    } else if !announcement.hand {
        cards.truncate(2);
        announcement.discarded = cards;
    }

    Ok(DecodedAnnouncement {
        announcement: announcement.normalized(),
        ouvert_cards,
        degraded,
    })
}

/// Encode an announcement the way the server expects it.
///
/// Modifiers implied by ouvert are left out; the decoder restores them.
pub fn encode_announcement(announcement: &GameAnnouncement, ouvert_cards: &[CardSlot]) -> String {
    let Some(type_char) = game_type_char(announcement.game_type) else {
        return String::new();
    };
    let mut out = String::from(type_char);
    let implied = announcement.ouvert && announcement.game_type != GameType::Null;
    if announcement.ouvert {
        out.push('O');
    }
    if announcement.hand && !implied {
        out.push('H');
    }
    if announcement.schneider && !implied {
        out.push('S');
    }
    if announcement.schwarz && !implied {
        out.push('Z');
    }

    let cards = if announcement.ouvert {
        ouvert_cards
    } else if !announcement.hand {
        &announcement.discarded[..]
    } else {
        &[]
    };
    for slot in cards {
        out.push('.');
        out.push_str(&slot.to_string());
    }
    out
}
