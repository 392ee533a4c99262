//! The per-game state machine: validated moves (`apply_move`) and the
//! unchecked accumulation path (`replay_move`) used for server summaries and
//! for repairing a remote view.

use tracing::{debug, info};

use crate::domain::announcement::GameAnnouncement;
use crate::domain::bidding::{AuctionOutcome, BidMove};
use crate::domain::cards_types::{known_cards, Card, CardSlot, GameType};
use crate::domain::dealing::validate_deal;
use crate::domain::game_transition::{derive_game_transitions, GameTransition, GameView};
use crate::domain::moves::{DealtCards, MoveInformation, MoveKind, MovePlayer};
use crate::domain::rules::{SKAT_SIZE, TRICKS_PER_GAME};
use crate::domain::scoring::compute_result;
use crate::domain::state::{
    require_declarer, require_phase, require_turn, resolve_trick_winner, BidAction, BidRecord,
    EndReason, GameState, Phase, Player, PrematureEnd, Trick,
};
use crate::domain::tricks::{play_card, start_trick_play};
use crate::errors::domain::{DomainError, ValidationKind};

/// Waiting → Dealing.
pub fn start_dealing(state: &mut GameState) -> Result<(), DomainError> {
    require_phase(state, Phase::Waiting)?;
    state.phase = Phase::Dealing;
    state.turn = None;
    Ok(())
}

/// Apply a move after checking it against phase, turn and rules.
///
/// On error the state is left exactly as it was.
pub fn apply_move(
    state: &mut GameState,
    mv: &MoveInformation,
) -> Result<Vec<GameTransition>, DomainError> {
    let before = GameView::of(state);
    let mut next = state.clone();
    apply_checked(&mut next, mv)?;
    if mv.degraded {
        next.data.degraded = true;
    }
    *state = next;
    let transitions = derive_game_transitions(&before, &GameView::of(state));
    debug!(kind = mv.kind.tag(), player = ?mv.player, phase = ?state.phase, "move applied");
    Ok(transitions)
}

fn require_seat(mv: &MoveInformation) -> Result<Player, DomainError> {
    mv.player.seat().ok_or_else(|| {
        DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("{} needs a seat, not the world", mv.kind.tag()),
        )
    })
}

fn require_world(mv: &MoveInformation) -> Result<(), DomainError> {
    match mv.player {
        MovePlayer::World => Ok(()),
        MovePlayer::Seat(p) => Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("{} comes from the table, not {p:?}", mv.kind.tag()),
        )),
    }
}

fn apply_checked(state: &mut GameState, mv: &MoveInformation) -> Result<(), DomainError> {
    match &mv.kind {
        MoveKind::Deal(dealt) => {
            require_world(mv)?;
            require_phase(state, Phase::Dealing)?;
            validate_deal(dealt)?;
            record_deal(state, dealt);
            state.phase = Phase::Bidding;
            state.turn = state.auction.pending().map(|(p, _)| p);
            Ok(())
        }
        MoveKind::Bid(v) => bid(state, require_seat(mv)?, BidMove::Bid(*v)),
        MoveKind::HoldBid => bid(state, require_seat(mv)?, BidMove::Hold),
        MoveKind::Pass => bid(state, require_seat(mv)?, BidMove::Pass),
        MoveKind::SkatRequest => {
            let who = require_seat(mv)?;
            require_phase(state, Phase::Declaring)?;
            require_turn(state, who)?;
            take_skat(state, who);
            state.phase = Phase::Discarding;
            Ok(())
        }
        MoveKind::PickUpSkat(slots) => {
            require_phase(state, Phase::Discarding)?;
            let declarer = require_declarer(state, "pick_up_skat")?;
            if let MovePlayer::Seat(p) = mv.player {
                if p != declarer {
                    return Err(DomainError::validation(
                        ValidationKind::OutOfTurn,
                        format!("{p:?} cannot pick up the skat"),
                    ));
                }
            }
            if slots.len() != SKAT_SIZE {
                return Err(DomainError::validation(
                    ValidationKind::InvalidDeal,
                    format!("skat has {} cards", slots.len()),
                ));
            }
            reveal_cards(state, declarer, slots);
            if state.data.dealt_skat.is_empty() {
                state.data.dealt_skat = slots.iter().filter_map(CardSlot::card).collect();
            }
            Ok(())
        }
        MoveKind::GameAnnouncement {
            announcement,
            ouvert_cards,
        } => {
            let who = require_seat(mv)?;
            announce(state, who, announcement, ouvert_cards)
        }
        MoveKind::ShowCards(slots) => {
            let who = require_seat(mv)?;
            if !matches!(state.phase, Phase::Declaring | Phase::TrickPlaying) {
                return Err(DomainError::validation(
                    ValidationKind::PhaseMismatch,
                    format!("cannot show cards in {:?}", state.phase),
                ));
            }
            if state.data.declarer != Some(who) {
                return Err(DomainError::validation(
                    ValidationKind::OutOfTurn,
                    format!("only the declarer shows cards, not {who:?}"),
                ));
            }
            reveal_cards(state, who, slots);
            state.data.ouvert_cards = slots.iter().filter_map(CardSlot::card).collect();
            Ok(())
        }
        MoveKind::CardPlay(card) => {
            let who = require_seat(mv)?;
            let played = play_card(state, who, *card)?;
            if played.last_trick {
                finish(state, Phase::GameOver)?;
            }
            Ok(())
        }
        MoveKind::Resign => {
            let who = require_seat(mv)?;
            end_early(state, EndReason::Resign, who)
        }
        MoveKind::TimeOut(p) => end_early(state, EndReason::TimeOut, *p),
        MoveKind::LeaveTable(p) => end_early(state, EndReason::LeaveTable, *p),
    }
}

fn record_deal(state: &mut GameState, dealt: &DealtCards) {
    for p in Player::ALL {
        let slots = &dealt.hands[p.index()];
        let known: Vec<Card> = slots.iter().filter_map(CardSlot::card).collect();
        state.data.hidden[p.index()] = (slots.len() - known.len()) as u8;
        state.data.dealt_hands[p.index()] = known.clone();
        state.data.hands[p.index()] = known;
    }
    let skat: Vec<Card> = dealt.skat.iter().filter_map(CardSlot::card).collect();
    state.data.skat_hidden = (dealt.skat.len() - skat.len()) as u8;
    state.data.dealt_skat = skat.clone();
    state.data.skat = skat;
    if dealt.has_unknown() {
        state.data.degraded = true;
    }
}

fn bid(state: &mut GameState, who: Player, mv: BidMove) -> Result<(), DomainError> {
    require_phase(state, Phase::Bidding)?;
    let (auction, outcome) = state.auction.step(who, mv)?;
    let action = match mv {
        BidMove::Bid(v) => BidAction::Bid(v),
        BidMove::Hold => BidAction::Hold(auction.bid_value()),
        BidMove::Pass => {
            state.data.passed[who.index()] = true;
            BidAction::Pass
        }
    };
    state.data.bids.push(BidRecord {
        player: who,
        action,
    });
    state.data.bid_value = auction.bid_value();
    state.auction = auction;

    match outcome {
        AuctionOutcome::Continue => {
            state.turn = state.auction.pending().map(|(p, _)| p);
        }
        AuctionOutcome::Declarer(declarer) => {
            info!(declarer = ?declarer, bid = state.data.bid_value, "bidding won");
            state.data.declarer = Some(declarer);
            state.phase = Phase::Declaring;
            state.turn = Some(declarer);
        }
        AuctionOutcome::AllPassed => settle_all_passed(state)?,
    }
    Ok(())
}

/// Nobody bid: Ramsch when the rules allow it, otherwise the game is passed in.
fn settle_all_passed(state: &mut GameState) -> Result<(), DomainError> {
    if state.rules.play_ramsch {
        info!("all passed, playing ramsch");
        state.data.announcement = Some(GameAnnouncement::new(GameType::Ramsch));
        start_trick_play(state);
        Ok(())
    } else {
        info!("all passed, game passed in");
        state.data.announcement = Some(GameAnnouncement::new(GameType::PassedIn));
        finish(state, Phase::GameOver)
    }
}

fn take_skat(state: &mut GameState, declarer: Player) {
    let d = declarer.index();
    let skat = std::mem::take(&mut state.data.skat);
    state.data.hands[d].extend(skat);
    state.data.hands[d].sort();
    state.data.hidden[d] += state.data.skat_hidden;
    state.data.skat_hidden = 0;
}

/// Turn hidden slots of `who` into the given known cards.
fn reveal_cards(state: &mut GameState, who: Player, slots: &[CardSlot]) {
    let d = who.index();
    for card in slots.iter().filter_map(CardSlot::card) {
        if state.data.hands[d].contains(&card) {
            continue;
        }
        if state.data.hidden[d] > 0 {
            state.data.hidden[d] -= 1;
            state.data.hands[d].push(card);
        }
    }
    state.data.hands[d].sort();
}

fn announce(
    state: &mut GameState,
    who: Player,
    announcement: &GameAnnouncement,
    ouvert_cards: &[CardSlot],
) -> Result<(), DomainError> {
    if !matches!(state.phase, Phase::Declaring | Phase::Discarding) {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!("cannot announce in {:?}", state.phase),
        ));
    }
    require_turn(state, who)?;
    announcement.validate()?;

    if state.phase == Phase::Declaring {
        if !announcement.hand {
            return Err(DomainError::validation(
                ValidationKind::InvalidAnnouncement,
                "pick up the skat before announcing a non-hand game",
            ));
        }
    } else {
        if announcement.hand {
            return Err(DomainError::validation(
                ValidationKind::InvalidAnnouncement,
                "hand game announced after picking up the skat",
            ));
        }
        discard(state, who, &announcement.discarded)?;
    }

    info!(declarer = ?who, game_type = ?announcement.game_type, hand = announcement.hand, "game announced");
    if announcement.ouvert && !ouvert_cards.is_empty() {
        state.data.ouvert_cards = known_cards(ouvert_cards);
        reveal_cards(state, who, ouvert_cards);
    }
    state.data.announcement = Some(announcement.clone());
    start_trick_play(state);
    Ok(())
}

/// Unreadable discard codes stand for cards the declarer held unseen.
fn discard(state: &mut GameState, who: Player, slots: &[CardSlot]) -> Result<(), DomainError> {
    let d = who.index();
    let hidden = state.data.hidden[d] as usize;
    if slots.is_empty() {
        // Remote view: the discards are not shown to us.
        if hidden < SKAT_SIZE {
            return Err(DomainError::validation(
                ValidationKind::InvalidDiscard,
                "two cards must be discarded",
            ));
        }
        state.data.hidden[d] -= SKAT_SIZE as u8;
        state.data.skat_hidden = SKAT_SIZE as u8;
        return Ok(());
    }

    let cards = known_cards(slots);
    let unreadable = slots.len() - cards.len();
    let missing = cards
        .iter()
        .filter(|c| !state.data.hands[d].contains(c))
        .count();
    if missing + unreadable > hidden {
        return Err(DomainError::validation(
            ValidationKind::InvalidDiscard,
            format!("{who:?} does not hold the discarded cards"),
        ));
    }
    for card in &cards {
        match state.data.hands[d].iter().position(|c| c == card) {
            Some(pos) => {
                state.data.hands[d].remove(pos);
            }
            None => state.data.hidden[d] -= 1,
        }
    }
    state.data.hidden[d] -= unreadable as u8;
    state.data.skat_hidden = unreadable as u8;
    state.data.discarded = cards.clone();
    state.data.skat = cards;
    Ok(())
}

fn end_early(state: &mut GameState, reason: EndReason, who: Player) -> Result<(), DomainError> {
    if !state.phase.is_active() {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!("{reason:?} in {:?}", state.phase),
        ));
    }
    state.data.premature_end = Some(PrematureEnd {
        reason,
        player: who,
    });
    info!(player = ?who, reason = ?reason, "game ended early");
    finish(state, Phase::PreliminaryEnd)
}

fn finish(state: &mut GameState, phase: Phase) -> Result<(), DomainError> {
    let result = compute_result(&state.data, &state.rules)?;
    info!(
        game_type = ?state.game_type(),
        declarer = ?state.data.declarer,
        won = result.won,
        value = result.game_value,
        "game finished"
    );
    state.data.result = Some(result);
    state.phase = phase;
    state.turn = None;
    Ok(())
}

/// Record a move without validation.
///
/// Accumulates whatever the move says into the game data and keeps phase and
/// turn plausible. Used to replay server summaries and to resynchronise after
/// the server reported something the local state could not explain.
pub fn replay_move(state: &mut GameState, mv: &MoveInformation) {
    if mv.degraded {
        state.data.degraded = true;
    }
    let seat = mv.player.seat();
    match &mv.kind {
        MoveKind::Deal(dealt) => {
            record_deal(state, dealt);
            if matches!(state.phase, Phase::Waiting | Phase::Dealing) {
                state.phase = Phase::Bidding;
                state.turn = state.auction.pending().map(|(p, _)| p);
            }
        }
        MoveKind::Bid(v) => {
            if let Some(p) = seat {
                replay_bid(state, p, BidMove::Bid(*v));
                state.data.bid_value = *v;
            }
        }
        MoveKind::HoldBid => {
            if let Some(p) = seat {
                replay_bid(state, p, BidMove::Hold);
            }
        }
        MoveKind::Pass => {
            if let Some(p) = seat {
                state.data.passed[p.index()] = true;
                replay_bid(state, p, BidMove::Pass);
            }
        }
        MoveKind::SkatRequest => {
            if let Some(p) = seat {
                state.data.declarer.get_or_insert(p);
                take_skat(state, p);
                state.phase = Phase::Discarding;
                state.turn = Some(p);
            }
        }
        MoveKind::PickUpSkat(slots) => {
            if let Some(d) = state.data.declarer.or(seat) {
                reveal_cards(state, d, slots);
            }
            if state.data.dealt_skat.is_empty() {
                state.data.dealt_skat = slots.iter().filter_map(CardSlot::card).collect();
            }
        }
        MoveKind::GameAnnouncement {
            announcement,
            ouvert_cards,
        } => {
            if let Some(p) = seat {
                state.data.declarer = Some(p);
                let d = p.index();
                for slot in &announcement.discarded {
                    let held = slot
                        .card()
                        .and_then(|card| state.data.hands[d].iter().position(|c| *c == card));
                    if let Some(pos) = held {
                        state.data.hands[d].remove(pos);
                    } else if state.data.hidden[d] > 0 {
                        state.data.hidden[d] -= 1;
                    }
                }
            }
            if !announcement.discarded.is_empty() {
                let cards = announcement.discarded_cards();
                state.data.skat_hidden = (announcement.discarded.len() - cards.len()) as u8;
                state.data.discarded = cards.clone();
                state.data.skat = cards;
            }
            if !ouvert_cards.is_empty() {
                if let Some(p) = seat {
                    reveal_cards(state, p, ouvert_cards);
                }
                state.data.ouvert_cards = known_cards(ouvert_cards);
            }
            state.data.announcement = Some(announcement.clone());
            if state.data.tricks.is_empty() {
                start_trick_play(state);
            }
        }
        MoveKind::ShowCards(slots) => {
            if let Some(p) = seat {
                reveal_cards(state, p, slots);
            }
            state.data.ouvert_cards = slots.iter().filter_map(CardSlot::card).collect();
        }
        MoveKind::CardPlay(card) => {
            if let Some(p) = seat {
                replay_card(state, p, *card);
            }
        }
        MoveKind::Resign => {
            if let Some(p) = seat {
                replay_end(state, EndReason::Resign, p);
            }
        }
        MoveKind::TimeOut(p) => replay_end(state, EndReason::TimeOut, *p),
        MoveKind::LeaveTable(p) => replay_end(state, EndReason::LeaveTable, *p),
    }
}

fn replay_bid(state: &mut GameState, who: Player, mv: BidMove) {
    let action = match mv {
        BidMove::Bid(v) => BidAction::Bid(v),
        BidMove::Hold => BidAction::Hold(state.data.bid_value),
        BidMove::Pass => BidAction::Pass,
    };
    state.data.bids.push(BidRecord {
        player: who,
        action,
    });
    if state.phase == Phase::Bidding {
        if let Ok((auction, outcome)) = state.auction.step(who, mv) {
            state.auction = auction;
            state.turn = state.auction.pending().map(|(p, _)| p);
            match outcome {
                AuctionOutcome::Continue => {}
                AuctionOutcome::Declarer(d) => {
                    state.data.declarer = Some(d);
                    state.phase = Phase::Declaring;
                    state.turn = Some(d);
                }
                AuctionOutcome::AllPassed => {
                    if let Err(e) = settle_all_passed(state) {
                        debug!(error = %e, "replayed auction could not be settled");
                        state.phase = Phase::GameOver;
                        state.turn = None;
                    }
                }
            }
        }
    }
}

fn replay_card(state: &mut GameState, who: Player, card: Card) {
    if state.data.tricks.is_empty() {
        state.data.tricks.push(Trick::new(0, Player::Forehand));
    }
    let game_type = state.game_type();

    // A complete trick without a winner: the next card's player led, so won it.
    if let Some(open) = state.data.tricks.last_mut() {
        if open.is_complete() {
            if open.winner().is_none() {
                let _ = open.set_winner(who);
            }
            let number = open.number + 1;
            state.data.tricks.push(Trick::new(number, who));
        }
    }

    let d = who.index();
    if let Some(pos) = state.data.hands[d].iter().position(|&c| c == card) {
        state.data.hands[d].remove(pos);
    } else if state.data.hidden[d] > 0 {
        state.data.hidden[d] -= 1;
    }

    let Some(trick) = state.data.tricks.last_mut() else {
        return;
    };
    trick.plays.push((who, card));
    if !trick.is_complete() {
        state.turn = trick.next_to_play();
        return;
    }
    let Some(winner) = game_type.and_then(|gt| resolve_trick_winner(gt, trick)) else {
        state.turn = None;
        return;
    };
    let _ = trick.set_winner(winner);
    let number = trick.number;
    if (number as usize) + 1 >= TRICKS_PER_GAME {
        if finish(state, Phase::GameOver).is_err() {
            state.turn = None;
        }
    } else {
        state.data.tricks.push(Trick::new(number + 1, winner));
        state.turn = Some(winner);
    }
}

fn replay_end(state: &mut GameState, reason: EndReason, who: Player) {
    state.data.premature_end = Some(PrematureEnd {
        reason,
        player: who,
    });
    if finish(state, Phase::PreliminaryEnd).is_err() {
        state.phase = Phase::PreliminaryEnd;
        state.turn = None;
    }
}
