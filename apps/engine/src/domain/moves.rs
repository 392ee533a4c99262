//! Canonical move events shared by local play and the wire decoder.

use serde::{Deserialize, Serialize};

use crate::domain::announcement::GameAnnouncement;
use crate::domain::cards_types::{Card, CardSlot};
use crate::domain::rules::{HAND_SIZE, PLAYERS, SKAT_SIZE};
use crate::domain::state::Player;

/// Who issued a move: a seat, or the table itself (deal, skat reveal).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum MovePlayer {
    World,
    Seat(Player),
}

impl MovePlayer {
    pub fn seat(self) -> Option<Player> {
        match self {
            MovePlayer::World => None,
            MovePlayer::Seat(p) => Some(p),
        }
    }
}

impl From<Player> for MovePlayer {
    fn from(p: Player) -> Self {
        MovePlayer::Seat(p)
    }
}

/// Three hands and the skat as seen by the receiver.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct DealtCards {
    pub hands: [Vec<CardSlot>; PLAYERS],
    pub skat: Vec<CardSlot>,
}

impl DealtCards {
    /// A fully visible deal.
    pub fn open(hands: [Vec<Card>; PLAYERS], skat: Vec<Card>) -> Self {
        let to_slots = |cards: Vec<Card>| cards.into_iter().map(CardSlot::Known).collect();
        let [fore, middle, rear] = hands;
        Self {
            hands: [to_slots(fore), to_slots(middle), to_slots(rear)],
            skat: to_slots(skat),
        }
    }

    pub fn has_standard_shape(&self) -> bool {
        self.hands.iter().all(|h| h.len() == HAND_SIZE) && self.skat.len() == SKAT_SIZE
    }

    pub fn has_unknown(&self) -> bool {
        self.hands
            .iter()
            .flatten()
            .chain(self.skat.iter())
            .any(CardSlot::is_unknown)
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum MoveKind {
    Deal(DealtCards),
    Bid(u16),
    HoldBid,
    Pass,
    SkatRequest,
    /// Skat handed to the declarer; hidden slots when the viewer may not see it.
    PickUpSkat(Vec<CardSlot>),
    GameAnnouncement {
        announcement: GameAnnouncement,
        /// The declarer's open hand for ouvert games.
        ouvert_cards: Vec<CardSlot>,
    },
    ShowCards(Vec<CardSlot>),
    CardPlay(Card),
    Resign,
    TimeOut(Player),
    LeaveTable(Player),
}

impl MoveKind {
    /// Short tag used in logs.
    pub fn tag(&self) -> &'static str {
        match self {
            MoveKind::Deal(_) => "deal",
            MoveKind::Bid(_) => "bid",
            MoveKind::HoldBid => "hold_bid",
            MoveKind::Pass => "pass",
            MoveKind::SkatRequest => "skat_request",
            MoveKind::PickUpSkat(_) => "pick_up_skat",
            MoveKind::GameAnnouncement { .. } => "game_announcement",
            MoveKind::ShowCards(_) => "show_cards",
            MoveKind::CardPlay(_) => "card_play",
            MoveKind::Resign => "resign",
            MoveKind::TimeOut(_) => "time_out",
            MoveKind::LeaveTable(_) => "leave_table",
        }
    }

    pub fn announce(announcement: GameAnnouncement) -> Self {
        MoveKind::GameAnnouncement {
            announcement,
            ouvert_cards: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct MoveInformation {
    pub player: MovePlayer,
    pub kind: MoveKind,
    /// Some card code in the move could not be decoded.
    pub degraded: bool,
}

impl MoveInformation {
    pub fn new(player: impl Into<MovePlayer>, kind: MoveKind) -> Self {
        Self {
            player: player.into(),
            kind,
            degraded: false,
        }
    }

    pub fn world(kind: MoveKind) -> Self {
        Self::new(MovePlayer::World, kind)
    }
}
