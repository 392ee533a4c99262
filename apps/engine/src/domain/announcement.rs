//! The declarer's game announcement and its consistency rules.

use serde::{Deserialize, Serialize};

use super::cards_types::{known_cards, Card, CardSlot, GameType};
use super::rules::SKAT_SIZE;
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameAnnouncement {
    pub game_type: GameType,
    pub hand: bool,
    pub ouvert: bool,
    pub schneider: bool,
    pub schwarz: bool,
    /// Cards pushed back into the skat. Empty for hand games, and for
    /// non-hand games whose discards the viewer cannot see. A code that could
    /// not be read stays in place as `CardSlot::Unknown`.
    pub discarded: Vec<CardSlot>,
}

impl GameAnnouncement {
    /// A plain announcement without modifiers or discards.
    pub fn new(game_type: GameType) -> Self {
        Self {
            game_type,
            hand: false,
            ouvert: false,
            schneider: false,
            schwarz: false,
            discarded: Vec::new(),
        }
    }

    pub fn hand(mut self) -> Self {
        self.hand = true;
        self
    }

    pub fn ouvert(mut self) -> Self {
        self.ouvert = true;
        self
    }

    pub fn schneider(mut self) -> Self {
        self.schneider = true;
        self
    }

    pub fn schwarz(mut self) -> Self {
        self.schwarz = true;
        self
    }

    pub fn with_discards(mut self, discarded: Vec<Card>) -> Self {
        self.discarded = discarded.into_iter().map(CardSlot::Known).collect();
        self
    }

    /// The discards that are actually known.
    pub fn discarded_cards(&self) -> Vec<Card> {
        known_cards(&self.discarded)
    }

    /// Check the modifier combination.
    pub fn validate(&self) -> Result<(), DomainError> {
        let invalid = |detail: &str| {
            Err(DomainError::validation(
                ValidationKind::InvalidAnnouncement,
                format!("{detail}: {self:?}"),
            ))
        };

        if !self.game_type.is_announceable() {
            return invalid("game type cannot be announced");
        }
        if self.hand && !self.discarded.is_empty() {
            return invalid("hand game with discarded cards");
        }
        if !self.hand && !self.discarded.is_empty() && self.discarded.len() != SKAT_SIZE {
            return invalid("exactly two cards must be discarded");
        }
        if self.discarded.len() == SKAT_SIZE
            && self.discarded[0].card().is_some()
            && self.discarded[0] == self.discarded[1]
        {
            return invalid("discarded the same card twice");
        }

        if self.game_type == GameType::Null {
            if self.schneider || self.schwarz {
                return invalid("null games cannot announce schneider or schwarz");
            }
            return Ok(());
        }

        if (self.schneider || self.schwarz) && !self.hand {
            return invalid("schneider and schwarz need a hand game");
        }
        if self.schwarz && !self.schneider {
            return invalid("schwarz implies schneider");
        }
        if self.ouvert && !(self.hand && self.schneider && self.schwarz) {
            return invalid("ouvert implies hand, schneider and schwarz");
        }
        Ok(())
    }

    /// Ouvert suit and grand games carry every announcement level.
    pub fn normalized(mut self) -> Self {
        if self.ouvert && self.game_type.is_trump_game() {
            self.hand = true;
            self.schneider = true;
            self.schwarz = true;
        }
        if self.schwarz {
            self.schneider = true;
        }
        self
    }
}
