//! The seam between the game runner and whoever decides moves for a seat.

use async_trait::async_trait;

use crate::domain::announcement::GameAnnouncement;
use crate::domain::bidding::{next_valid_bid, BidRole};
use crate::domain::cards_types::{Card, GameType};
use crate::domain::moves::{MoveInformation, MoveKind};
use crate::domain::state::{GameState, Phase, Player};
use crate::domain::tricks::legal_moves;
use crate::error::AppError;

/// What the seat to act is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRequest {
    /// Raise to at least `next` (`Bid`) or `Pass`. `None` when the ladder is exhausted.
    Bid { next: Option<u16> },
    /// `HoldBid` at `value` or `Pass`.
    Hold { value: u16 },
    /// `SkatRequest`, or a hand game announcement.
    Declare,
    /// A non-hand announcement carrying the two discards.
    Discard,
    /// `CardPlay` of one of the legal cards.
    PlayCard,
}

/// What one seat is allowed to see when asked for a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerView {
    pub seat: Player,
    pub phase: Phase,
    pub hand: Vec<Card>,
    pub bid_value: u16,
    pub declarer: Option<Player>,
    pub announcement: Option<GameAnnouncement>,
    pub current_trick: Vec<(Player, Card)>,
    pub completed_tricks: usize,
    pub legal_cards: Vec<Card>,
    pub ouvert_cards: Vec<Card>,
}

impl PlayerView {
    pub fn of(state: &GameState, seat: Player) -> Self {
        let current_trick = state
            .data
            .current_trick()
            .filter(|t| !t.is_complete())
            .map(|t| t.plays.clone())
            .unwrap_or_default();
        Self {
            seat,
            phase: state.phase,
            hand: state.data.hands[seat.index()].clone(),
            bid_value: state.data.bid_value,
            declarer: state.data.declarer,
            announcement: state.data.announcement.clone(),
            current_trick,
            completed_tricks: state.data.completed_tricks(),
            legal_cards: legal_moves(state, seat),
            ouvert_cards: state.data.ouvert_cards.clone(),
        }
    }

    pub fn game_type(&self) -> Option<GameType> {
        self.announcement.as_ref().map(|a| a.game_type)
    }
}

/// The seat that must act next and what it is asked for; `None` when nobody is.
pub fn pending_request(state: &GameState) -> Option<(Player, MoveRequest)> {
    match state.phase {
        Phase::Bidding => {
            let (seat, role) = state.auction.pending()?;
            let request = match role {
                BidRole::Asker | BidRole::Opener => MoveRequest::Bid {
                    next: next_valid_bid(state.auction.bid_value()),
                },
                BidRole::Listener => MoveRequest::Hold {
                    value: state.auction.bid_value(),
                },
            };
            Some((seat, request))
        }
        Phase::Declaring => Some((state.turn?, MoveRequest::Declare)),
        Phase::Discarding => Some((state.turn?, MoveRequest::Discard)),
        Phase::TrickPlaying => Some((state.turn?, MoveRequest::PlayCard)),
        Phase::Waiting | Phase::Dealing | Phase::PreliminaryEnd | Phase::GameOver => None,
    }
}

/// Decides moves for one seat.
///
/// Implementations may take as long as they like; the runner bounds every
/// request with the configured move timeout and cancels it when the game ends.
#[async_trait]
pub trait PlayerSource: Send + Sync {
    fn name(&self) -> &str;

    /// Choose a move for `request`.
    async fn choose_move(
        &self,
        request: MoveRequest,
        view: &PlayerView,
    ) -> Result<MoveKind, AppError>;

    /// Called after every applied move, including the player's own.
    async fn notify(&self, _mv: &MoveInformation) {}
}
