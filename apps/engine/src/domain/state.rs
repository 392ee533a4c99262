use serde::{Deserialize, Serialize};

use crate::config::rules::RulesConfig;
use crate::domain::announcement::GameAnnouncement;
use crate::domain::bidding::Auction;
use crate::domain::cards_logic::card_beats;
use crate::domain::cards_types::{card_points, Card, GameType};
use crate::domain::rules::PLAYERS;
use crate::errors::domain::{DomainError, ValidationKind};

/// Seat positions for one game. Forehand leads the first trick.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Player {
    Forehand,
    Middlehand,
    Rearhand,
}

const LEFT_NEIGHBOUR: [Player; PLAYERS] = [Player::Middlehand, Player::Rearhand, Player::Forehand];
const RIGHT_NEIGHBOUR: [Player; PLAYERS] =
    [Player::Rearhand, Player::Forehand, Player::Middlehand];

impl Player {
    pub const ALL: [Player; PLAYERS] = [Player::Forehand, Player::Middlehand, Player::Rearhand];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(i: usize) -> Option<Player> {
        Self::ALL.get(i).copied()
    }

    /// The player who acts after this one.
    #[inline]
    pub fn left_neighbour(self) -> Player {
        LEFT_NEIGHBOUR[self.index()]
    }

    #[inline]
    pub fn right_neighbour(self) -> Player {
        RIGHT_NEIGHBOUR[self.index()]
    }

    /// Seat this player holds in the next game of a series (fore ← middle, middle ← rear, rear ← fore).
    #[inline]
    pub fn next_game_seat(self) -> Player {
        self.right_neighbour()
    }
}

/// Overall game progression phases.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    /// Created, nothing dealt yet.
    Waiting,
    /// Waiting for the deal from the dealer (world).
    Dealing,
    Bidding,
    /// Declarer chooses between hand game and taking the skat.
    Declaring,
    /// Declarer holds the skat and must discard two cards with the announcement.
    Discarding,
    TrickPlaying,
    /// Game ended early by resign, time-out or leaving.
    PreliminaryEnd,
    GameOver,
}

impl Phase {
    pub fn is_finished(self) -> bool {
        matches!(self, Phase::PreliminaryEnd | Phase::GameOver)
    }

    pub fn is_active(self) -> bool {
        !matches!(self, Phase::Waiting | Phase::PreliminaryEnd | Phase::GameOver)
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Trick {
    /// 0-based trick number.
    pub number: u8,
    pub leader: Player,
    pub plays: Vec<(Player, Card)>,
    winner: Option<Player>,
}

impl Trick {
    pub fn new(number: u8, leader: Player) -> Self {
        Self {
            number,
            leader,
            plays: Vec::with_capacity(PLAYERS),
            winner: None,
        }
    }

    pub fn led_card(&self) -> Option<Card> {
        self.plays.first().map(|&(_, c)| c)
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == PLAYERS
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Set the trick winner; a winner can be set only once.
    pub fn set_winner(&mut self, winner: Player) -> Result<(), DomainError> {
        if self.winner.is_some() {
            return Err(DomainError::validation_other(format!(
                "Invariant violated: trick {} already has a winner",
                self.number
            )));
        }
        self.winner = Some(winner);
        Ok(())
    }

    /// Player expected to play next in this trick.
    pub fn next_to_play(&self) -> Option<Player> {
        if self.is_complete() {
            return None;
        }
        let mut p = self.leader;
        for _ in 0..self.plays.len() {
            p = p.left_neighbour();
        }
        Some(p)
    }

    pub fn cards(&self) -> Vec<Card> {
        self.plays.iter().map(|&(_, c)| c).collect()
    }

    pub fn points(&self) -> u8 {
        card_points(&self.cards())
    }
}

/// Winner of a complete trick under `game_type`.
pub fn resolve_trick_winner(game_type: GameType, trick: &Trick) -> Option<Player> {
    if !trick.is_complete() {
        return None;
    }
    let led = trick.led_card()?;
    let mut best = trick.plays[0];
    for &(p, card) in &trick.plays[1..] {
        if card_beats(game_type, card, best.1, led) {
            best = (p, card);
        }
    }
    Some(best.0)
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum BidAction {
    Bid(u16),
    Hold(u16),
    Pass,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct BidRecord {
    pub player: Player,
    pub action: BidAction,
}

/// How a game ended before all tricks were played.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum EndReason {
    Resign,
    TimeOut,
    LeaveTable,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct PrematureEnd {
    pub reason: EndReason,
    pub player: Player,
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub declarer_points: u8,
    pub opponent_points: u8,
    pub declarer_tricks: u8,
    pub won: bool,
    pub schneider: bool,
    pub schwarz: bool,
    pub overbid: bool,
    pub matadors: u8,
    /// `true` for "mit" (declarer holds the top trump), `false` for "ohne".
    pub with_matadors: bool,
    pub multiplier: u16,
    /// Signed score for the declarer (or the Ramsch loser).
    pub game_value: i32,
    pub premature: bool,
    pub passed_in: bool,
    /// Card points per seat in Ramsch.
    pub ramsch_points: Option<[u8; PLAYERS]>,
    /// Signed score per seat in Ramsch.
    pub ramsch_scores: Option<[i32; PLAYERS]>,
    pub jungfrau: bool,
    pub durchmarsch: bool,
}

/// Everything recorded about one game.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameData {
    pub player_names: [String; PLAYERS],
    pub dealt_hands: [Vec<Card>; PLAYERS],
    pub dealt_skat: Vec<Card>,
    /// Current hands (known cards only).
    pub hands: [Vec<Card>; PLAYERS],
    /// Cards in each hand the viewer cannot see.
    pub hidden: [u8; PLAYERS],
    pub skat: Vec<Card>,
    pub skat_hidden: u8,
    pub discarded: Vec<Card>,
    pub bids: Vec<BidRecord>,
    pub passed: [bool; PLAYERS],
    pub bid_value: u16,
    pub announcement: Option<GameAnnouncement>,
    pub ouvert_cards: Vec<Card>,
    pub tricks: Vec<Trick>,
    pub declarer: Option<Player>,
    pub premature_end: Option<PrematureEnd>,
    pub result: Option<GameResult>,
    /// Set when a decoded move carried malformed data.
    pub degraded: bool,
}

impl GameData {
    pub fn game_type(&self) -> Option<GameType> {
        self.announcement.as_ref().map(|a| a.game_type)
    }

    pub fn current_trick(&self) -> Option<&Trick> {
        self.tricks.last()
    }

    pub fn hand_size(&self, player: Player) -> usize {
        self.hands[player.index()].len() + self.hidden[player.index()] as usize
    }

    pub fn tricks_won_by(&self, player: Player) -> Vec<&Trick> {
        self.tricks
            .iter()
            .filter(|t| t.winner() == Some(player))
            .collect()
    }

    pub fn completed_tricks(&self) -> usize {
        self.tricks.iter().filter(|t| t.winner().is_some()).count()
    }

    pub fn bid_of(&self, player: Player) -> Option<u16> {
        self.bids
            .iter()
            .rev()
            .filter(|r| r.player == player)
            .find_map(|r| match r.action {
                BidAction::Bid(v) | BidAction::Hold(v) => Some(v),
                BidAction::Pass => None,
            })
    }
}

/// Per-game container driven by the state machine in `game_flow`.
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: Phase,
    pub data: GameData,
    pub auction: Auction,
    /// Player expected to act, if any.
    pub turn: Option<Player>,
    pub rules: RulesConfig,
}

impl GameState {
    pub fn new(rules: RulesConfig) -> Self {
        Self {
            phase: Phase::Waiting,
            data: GameData::default(),
            auction: Auction::new(),
            turn: None,
            rules,
        }
    }

    pub fn with_players(rules: RulesConfig, names: [String; PLAYERS]) -> Self {
        let mut state = Self::new(rules);
        state.data.player_names = names;
        state
    }

    pub fn game_type(&self) -> Option<GameType> {
        self.data.game_type()
    }

    pub fn result(&self) -> Option<&GameResult> {
        self.data.result.as_ref()
    }
}

pub fn require_phase(state: &GameState, expected: Phase) -> Result<(), DomainError> {
    if state.phase != expected {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!("expected {expected:?}, in {:?}", state.phase),
        ));
    }
    Ok(())
}

pub fn require_turn(state: &GameState, who: Player) -> Result<(), DomainError> {
    match state.turn {
        Some(turn) if turn == who => Ok(()),
        Some(turn) => Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("{who:?} moved, {turn:?} to act"),
        )),
        None => Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("{who:?} moved, nobody to act"),
        )),
    }
}

pub fn require_declarer(state: &GameState, ctx: &'static str) -> Result<Player, DomainError> {
    state.data.declarer.ok_or_else(|| {
        DomainError::validation_other(format!("Invariant violated: declarer must be set ({ctx})"))
    })
}

pub fn require_game_type(state: &GameState, ctx: &'static str) -> Result<GameType, DomainError> {
    state.game_type().ok_or_else(|| {
        DomainError::validation_other(format!(
            "Invariant violated: announcement must be set ({ctx})"
        ))
    })
}
