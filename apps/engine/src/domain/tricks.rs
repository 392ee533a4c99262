use crate::domain::cards_logic::{is_allowed, legal_cards};
use crate::domain::cards_types::Card;
use crate::domain::rules::TRICKS_PER_GAME;
use crate::domain::state::{
    require_game_type, require_phase, require_turn, resolve_trick_winner, GameState, Phase, Player,
    Trick,
};
use crate::errors::domain::{DomainError, ValidationKind};

/// Result of playing a card, describing what state changes occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayCardResult {
    /// Whether the play completed a trick.
    pub trick_completed: bool,
    /// Winner of the completed trick, if one was completed.
    pub trick_winner: Option<Player>,
    /// Whether that was the last trick of the game.
    pub last_trick: bool,
}

/// Legal cards for `who`, independent of turn enforcement.
///
/// Empty outside trick play. When the hand holds cards the viewer cannot see,
/// every known card is returned since following cannot be judged.
pub fn legal_moves(state: &GameState, who: Player) -> Vec<Card> {
    if state.phase != Phase::TrickPlaying {
        return Vec::new();
    }
    let Some(game_type) = state.game_type() else {
        return Vec::new();
    };
    let hand = &state.data.hands[who.index()];
    let led = state
        .data
        .current_trick()
        .filter(|t| !t.is_complete())
        .and_then(Trick::led_card);
    if state.data.hidden[who.index()] > 0 {
        let mut any = hand.clone();
        any.sort();
        return any;
    }
    legal_cards(game_type, led, hand)
}

fn already_played(state: &GameState, card: Card) -> bool {
    state
        .data
        .tricks
        .iter()
        .any(|t| t.plays.iter().any(|&(_, c)| c == card))
}

/// Play a card into the current trick, enforcing phase, turn and following.
pub fn play_card(
    state: &mut GameState,
    who: Player,
    card: Card,
) -> Result<PlayCardResult, DomainError> {
    require_phase(state, Phase::TrickPlaying)?;
    require_turn(state, who)?;
    let game_type = require_game_type(state, "play_card")?;

    if already_played(state, card) {
        return Err(DomainError::validation(
            ValidationKind::CardAlreadyPlayed,
            format!("{card} was already played"),
        ));
    }

    let idx = who.index();
    let pos = state.data.hands[idx].iter().position(|&c| c == card);
    let hidden = state.data.hidden[idx];
    if pos.is_none() && hidden == 0 {
        return Err(DomainError::validation(
            ValidationKind::CardNotInHand,
            format!("{who:?} does not hold {card}"),
        ));
    }

    let trick = state
        .data
        .current_trick()
        .ok_or_else(|| DomainError::validation_other("Invariant violated: no open trick"))?;
    if let (Some(led), 0) = (trick.led_card(), hidden) {
        if !is_allowed(game_type, led, card, &state.data.hands[idx]) {
            return Err(DomainError::validation(
                ValidationKind::MustFollowSuit,
                format!("{card} does not follow {led}"),
            ));
        }
    }

    // Validation passed; mutate.
    match pos {
        Some(p) => {
            state.data.hands[idx].remove(p);
        }
        None => state.data.hidden[idx] -= 1,
    }

    let trick = state
        .data
        .tricks
        .last_mut()
        .ok_or_else(|| DomainError::validation_other("Invariant violated: no open trick"))?;
    trick.plays.push((who, card));

    if !trick.is_complete() {
        state.turn = trick.next_to_play();
        return Ok(PlayCardResult {
            trick_completed: false,
            trick_winner: None,
            last_trick: false,
        });
    }

    let winner = resolve_trick_winner(game_type, trick)
        .ok_or_else(|| DomainError::validation_other("Invariant violated: trick has no winner"))?;
    trick.set_winner(winner)?;
    let number = trick.number;

    let last_trick = state.data.tricks.len() >= TRICKS_PER_GAME;
    if last_trick {
        state.turn = None;
    } else {
        state.data.tricks.push(Trick::new(number + 1, winner));
        state.turn = Some(winner);
    }

    Ok(PlayCardResult {
        trick_completed: true,
        trick_winner: Some(winner),
        last_trick,
    })
}

/// Open the first trick; Forehand leads.
pub fn start_trick_play(state: &mut GameState) {
    state.data.tricks.clear();
    state.data.tricks.push(Trick::new(0, Player::Forehand));
    state.phase = Phase::TrickPlaying;
    state.turn = Some(Player::Forehand);
}
