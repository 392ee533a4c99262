//! Bid ladder and the auction between the three seats.
//!
//! Middlehand bids to Forehand first; the survivor then faces Rearhand. When
//! nobody has bid after both rounds, Forehand may still open or pass.

use crate::domain::rules::BID_LADDER;
use crate::domain::state::Player;
use crate::errors::domain::{DomainError, ValidationKind};

pub fn bid_ladder() -> &'static [u16] {
    &BID_LADDER
}

/// Smallest ladder value strictly above `current` (18 when nothing was bid yet).
pub fn next_valid_bid(current: u16) -> Option<u16> {
    BID_LADDER.iter().copied().find(|&v| v > current)
}

/// Whether `next` is a legal raise over `current`.
pub fn is_valid_raise(current: u16, next: u16) -> bool {
    next > current && BID_LADDER.contains(&next)
}

/// What the seat to act is asked for.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum BidRole {
    /// May raise the bid or pass.
    Asker,
    /// May hold the current bid or pass.
    Listener,
    /// Forehand after two silent passes: may open the bidding or pass.
    Opener,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Stage {
    /// Middlehand asks Forehand.
    First,
    /// Rearhand asks the survivor of the first round.
    Second,
    /// Nobody bid; Forehand may open.
    ForehandOption,
    Finished,
}

/// Input to the auction.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum BidMove {
    Bid(u16),
    Hold,
    Pass,
}

/// Outcome after one auction step.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum AuctionOutcome {
    Continue,
    Declarer(Player),
    AllPassed,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Auction {
    stage: Stage,
    asker: Player,
    listener: Player,
    awaiting_answer: bool,
    bid_value: u16,
}

impl Default for Auction {
    fn default() -> Self {
        Self::new()
    }
}

impl Auction {
    pub fn new() -> Self {
        Self {
            stage: Stage::First,
            asker: Player::Middlehand,
            listener: Player::Forehand,
            awaiting_answer: false,
            bid_value: 0,
        }
    }

    pub fn bid_value(&self) -> u16 {
        self.bid_value
    }

    pub fn is_finished(&self) -> bool {
        self.stage == Stage::Finished
    }

    /// Seat to act and what it may do; `None` once the auction is over.
    pub fn pending(&self) -> Option<(Player, BidRole)> {
        match self.stage {
            Stage::Finished => None,
            Stage::ForehandOption => Some((Player::Forehand, BidRole::Opener)),
            Stage::First | Stage::Second if self.awaiting_answer => {
                Some((self.listener, BidRole::Listener))
            }
            Stage::First | Stage::Second => Some((self.asker, BidRole::Asker)),
        }
    }

    /// Compute the auction after `who` plays `mv`, leaving `self` untouched.
    pub fn step(&self, who: Player, mv: BidMove) -> Result<(Auction, AuctionOutcome), DomainError> {
        let Some((to_act, role)) = self.pending() else {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "auction is over",
            ));
        };
        if who != to_act {
            return Err(DomainError::validation(
                ValidationKind::OutOfTurn,
                format!("{who:?} bid, {to_act:?} to act"),
            ));
        }

        let mut next = self.clone();
        let outcome = match (role, mv) {
            (BidRole::Asker, BidMove::Bid(v)) => {
                next.require_raise(v)?;
                next.bid_value = v;
                next.awaiting_answer = true;
                AuctionOutcome::Continue
            }
            (BidRole::Asker, BidMove::Pass) => next.advance(self.listener),
            (BidRole::Listener, BidMove::Hold) => {
                next.awaiting_answer = false;
                AuctionOutcome::Continue
            }
            (BidRole::Listener, BidMove::Pass) => next.advance(self.asker),
            (BidRole::Opener, BidMove::Bid(v)) => {
                next.require_raise(v)?;
                next.bid_value = v;
                next.stage = Stage::Finished;
                AuctionOutcome::Declarer(Player::Forehand)
            }
            (BidRole::Opener, BidMove::Pass) => {
                next.stage = Stage::Finished;
                AuctionOutcome::AllPassed
            }
            (role, mv) => {
                return Err(DomainError::validation(
                    ValidationKind::InvalidBid,
                    format!("{mv:?} not allowed as {role:?}"),
                ))
            }
        };
        Ok((next, outcome))
    }

    fn require_raise(&self, v: u16) -> Result<(), DomainError> {
        if !is_valid_raise(self.bid_value, v) {
            return Err(DomainError::validation(
                ValidationKind::InvalidBid,
                format!("{v} does not raise {}", self.bid_value),
            ));
        }
        Ok(())
    }

    fn advance(&mut self, survivor: Player) -> AuctionOutcome {
        self.awaiting_answer = false;
        match self.stage {
            Stage::First => {
                self.stage = Stage::Second;
                self.asker = Player::Rearhand;
                self.listener = survivor;
                AuctionOutcome::Continue
            }
            Stage::Second if self.bid_value > 0 => {
                self.stage = Stage::Finished;
                AuctionOutcome::Declarer(survivor)
            }
            Stage::Second => {
                self.stage = Stage::ForehandOption;
                AuctionOutcome::Continue
            }
            Stage::ForehandOption | Stage::Finished => AuctionOutcome::Continue,
        }
    }
}
