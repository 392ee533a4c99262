//! A player that picks uniformly among legal moves.

use std::sync::Mutex;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::domain::announcement::GameAnnouncement;
use crate::domain::cards_types::GameType;
use crate::domain::moves::MoveKind;
use crate::error::AppError;
use crate::services::player_source::{MoveRequest, PlayerSource, PlayerView};

const ANNOUNCEABLE: [GameType; 6] = [
    GameType::Clubs,
    GameType::Spades,
    GameType::Hearts,
    GameType::Diamonds,
    GameType::Grand,
    GameType::Null,
];

/// Random legal moves; seedable for reproducible series.
pub struct RandomPlayer {
    name: String,
    rng: Mutex<StdRng>,
    /// Highest value this player will bid or hold.
    bid_limit: u16,
}

impl RandomPlayer {
    pub const DEFAULT_BID_LIMIT: u16 = 48;

    pub fn new(name: impl Into<String>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            name: name.into(),
            rng: Mutex::new(rng),
            bid_limit: Self::DEFAULT_BID_LIMIT,
        }
    }

    pub fn with_bid_limit(mut self, limit: u16) -> Self {
        self.bid_limit = limit;
        self
    }

    fn decide(&self, request: MoveRequest, view: &PlayerView) -> Result<MoveKind, AppError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| AppError::player_source(format!("RNG lock poisoned: {e}")))?;

        let kind = match request {
            MoveRequest::Bid { next: Some(v) } if v <= self.bid_limit && rng.random_bool(0.5) => {
                MoveKind::Bid(v)
            }
            MoveRequest::Bid { .. } => MoveKind::Pass,
            MoveRequest::Hold { value } if value <= self.bid_limit && rng.random_bool(0.6) => {
                MoveKind::HoldBid
            }
            MoveRequest::Hold { .. } => MoveKind::Pass,
            MoveRequest::Declare => {
                if rng.random_bool(0.7) {
                    MoveKind::SkatRequest
                } else {
                    let game_type = *ANNOUNCEABLE
                        .choose(&mut *rng)
                        .ok_or_else(|| AppError::player_source("no game type"))?;
                    MoveKind::announce(GameAnnouncement::new(game_type).hand())
                }
            }
            MoveRequest::Discard => {
                let discards: Vec<_> = view.hand.choose_multiple(&mut *rng, 2).copied().collect();
                if discards.len() != 2 {
                    return Err(AppError::player_source("fewer than two cards to discard"));
                }
                let game_type = *ANNOUNCEABLE
                    .choose(&mut *rng)
                    .ok_or_else(|| AppError::player_source("no game type"))?;
                MoveKind::announce(GameAnnouncement::new(game_type).with_discards(discards))
            }
            MoveRequest::PlayCard => {
                let card = view
                    .legal_cards
                    .choose(&mut *rng)
                    .copied()
                    .ok_or_else(|| AppError::player_source("no legal card to play"))?;
                MoveKind::CardPlay(card)
            }
        };
        Ok(kind)
    }
}

#[async_trait]
impl PlayerSource for RandomPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn choose_move(
        &self,
        request: MoveRequest,
        view: &PlayerView,
    ) -> Result<MoveKind, AppError> {
        self.decide(request, view)
    }
}
