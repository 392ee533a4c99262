//! Decoding and encoding of single `<mover> <move>` pairs.

use tracing::{debug, warn};

use crate::domain::cards_parsing::{parse_slot, HIDDEN_CARD};
use crate::domain::cards_types::{Card, CardSlot};
use crate::domain::moves::{DealtCards, MoveInformation, MoveKind, MovePlayer};
use crate::domain::rules::{HAND_SIZE, PLAYERS};
use crate::domain::state::Player;
use crate::errors::decode::{DecodeError, DecodeErrorKind};
use crate::protocol::iss::announcement::{decode_announcement, encode_announcement};

/// Length of a deal token: three hands of ten codes, the skat, separators.
pub const DEAL_TOKEN_LEN: usize = 95;
const HIDDEN_SKAT: &str = "??.??";

pub fn parse_mover(token: &str) -> Result<MovePlayer, DecodeError> {
    match token {
        "w" => Ok(MovePlayer::World),
        other => parse_seat(other).map(MovePlayer::Seat),
    }
}

pub fn parse_seat(token: &str) -> Result<Player, DecodeError> {
    token
        .parse::<usize>()
        .ok()
        .and_then(Player::from_index)
        .ok_or_else(|| DecodeError::new(DecodeErrorKind::BadSeat, token, "expected 0, 1 or 2"))
}

pub fn encode_mover(player: MovePlayer) -> String {
    match player {
        MovePlayer::World => "w".to_string(),
        MovePlayer::Seat(p) => p.index().to_string(),
    }
}

/// Seat after the `TI.` / `LE.` prefix.
fn seat_suffix(token: &str) -> Result<Player, DecodeError> {
    let seat = token.get(3..).ok_or_else(|| DecodeError::missing(token, "seat"))?;
    parse_seat(seat)
}

/// Split a '.'-joined card list into slots; reports whether any code was unknown.
fn parse_slots(list: &str) -> (Vec<CardSlot>, bool) {
    let slots: Vec<CardSlot> = list
        .split('.')
        .filter(|c| !c.is_empty())
        .map(parse_slot)
        .collect();
    let degraded = slots.iter().any(CardSlot::is_unknown);
    (slots, degraded)
}

/// Decode a deal, either `hand|hand|hand|skat` with hidden hands or the
/// positional form used in game summaries.
pub fn parse_deal(token: &str) -> Result<DealtCards, DecodeError> {
    let groups: Vec<&str> = if token.contains('|') {
        token.split('|').collect()
    } else {
        [(0, 29), (30, 59), (60, 89), (90, token.len())]
            .into_iter()
            .map(|(from, to)| {
                token
                    .get(from..to)
                    .ok_or_else(|| DecodeError::missing(token, "card group"))
            })
            .collect::<Result<_, _>>()?
    };
    let [fore, middle, rear, skat] = groups[..] else {
        return Err(DecodeError::new(
            DecodeErrorKind::UnrecognizedShape,
            token,
            format!("deal has {} groups", groups.len()),
        ));
    };
    let hand = |group: &str| parse_slots(group).0;
    Ok(DealtCards {
        hands: [hand(fore), hand(middle), hand(rear)],
        skat: hand(skat),
    })
}

fn encode_deal(dealt: &DealtCards) -> String {
    let join = |slots: &[CardSlot]| {
        slots
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(".")
    };
    let mut groups: Vec<String> = dealt.hands.iter().map(|h| join(h)).collect();
    groups.push(join(&dealt.skat));
    groups.join("|")
}

fn is_pick_up_skat(token: &str) -> bool {
    token.len() == 5 && token.as_bytes()[2] == b'.'
}

/// Decode one move given its mover token (`w`, `0`, `1`, `2`) and move token.
pub fn parse_move(mover_token: &str, move_token: &str) -> Result<MoveInformation, DecodeError> {
    let player = parse_mover(mover_token)?;
    let mut degraded = false;

    let kind = match move_token {
        "y" => MoveKind::HoldBid,
        "p" => MoveKind::Pass,
        "s" => MoveKind::SkatRequest,
        "RE" => MoveKind::Resign,
        HIDDEN_SKAT => MoveKind::PickUpSkat(vec![CardSlot::Hidden, CardSlot::Hidden]),
        t if t.starts_with("TI.") => MoveKind::TimeOut(seat_suffix(t)?),
        t if t.starts_with("LE.") => MoveKind::LeaveTable(seat_suffix(t)?),
        t if t.starts_with("SC") => {
            let (slots, bad) = t
                .split_once('.')
                .map(|(_, list)| parse_slots(list))
                .unwrap_or_default();
            degraded = bad;
            MoveKind::ShowCards(slots)
        }
        t => {
            if let Ok(card) = t.parse::<Card>() {
                MoveKind::CardPlay(card)
            } else if !t.is_empty() && t.bytes().all(|b| b.is_ascii_digit()) {
                MoveKind::Bid(t.parse::<u16>().map_err(|_| DecodeError::bad_number(t))?)
            } else if t.len() == DEAL_TOKEN_LEN {
                let dealt = parse_deal(t)?;
                degraded = dealt.has_unknown();
                MoveKind::Deal(dealt)
            } else if is_pick_up_skat(t) {
                let (slots, bad) = parse_slots(t);
                degraded = bad;
                MoveKind::PickUpSkat(slots)
            } else {
                let decoded = decode_announcement(t)?;
                degraded = decoded.degraded;
                MoveKind::GameAnnouncement {
                    announcement: decoded.announcement,
                    ouvert_cards: decoded.ouvert_cards,
                }
            }
        }
    };

    if degraded {
        warn!(mover = mover_token, token = move_token, "move carries unknown card codes");
    }
    debug!(mover = mover_token, token = move_token, kind = kind.tag(), "decoded move");
    Ok(MoveInformation {
        player,
        kind,
        degraded,
    })
}

/// Encode a move token; the inverse of [`parse_move`] for well-formed moves.
pub fn encode_move(kind: &MoveKind) -> String {
    let slots = |slots: &[CardSlot]| {
        slots
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(".")
    };
    match kind {
        MoveKind::Deal(dealt) => encode_deal(dealt),
        MoveKind::Bid(v) => v.to_string(),
        MoveKind::HoldBid => "y".to_string(),
        MoveKind::Pass => "p".to_string(),
        MoveKind::SkatRequest => "s".to_string(),
        MoveKind::PickUpSkat(skat) => slots(skat),
        MoveKind::GameAnnouncement {
            announcement,
            ouvert_cards,
        } => encode_announcement(announcement, ouvert_cards),
        MoveKind::ShowCards(cards) if cards.is_empty() => "SC".to_string(),
        MoveKind::ShowCards(cards) => format!("SC.{}", slots(cards)),
        MoveKind::CardPlay(card) => card.to_string(),
        MoveKind::Resign => "RE".to_string(),
        MoveKind::TimeOut(p) => format!("TI.{}", p.index()),
        MoveKind::LeaveTable(p) => format!("LE.{}", p.index()),
    }
}

/// A deal token as the server sends it to `viewer`: other hands and the skat hidden.
pub fn encode_deal_for(viewer: Player, hands: &[Vec<Card>; PLAYERS]) -> String {
    let mut dealt = DealtCards::default();
    for p in Player::ALL {
        dealt.hands[p.index()] = if p == viewer {
            hands[p.index()].iter().copied().map(CardSlot::Known).collect()
        } else {
            vec![CardSlot::Hidden; HAND_SIZE]
        };
    }
    dealt.skat = vec![CardSlot::Hidden; 2];
    encode_deal(&dealt)
}
