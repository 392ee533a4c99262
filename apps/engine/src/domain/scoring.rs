//! Game result calculation for every game type.

use std::collections::HashSet;

use crate::config::rules::{RamschSkatOwner, RulesConfig};
use crate::domain::announcement::GameAnnouncement;
use crate::domain::cards_logic::trump_order;
use crate::domain::cards_types::{card_points, Card, GameType};
use crate::domain::rules::{
    base_value, DURCHMARSCH_VALUE, PLAYERS, SCHNEIDER_THRESHOLD, TRICKS_PER_GAME, WIN_THRESHOLD,
};
use crate::domain::state::{GameData, GameResult, Player};
use crate::errors::domain::DomainError;

/// Matadors "mit" (`true`) or "ohne" (`false`) counted from the top trump.
///
/// A declarer without a single trump is "ohne" all of them.
pub fn count_matadors(game_type: GameType, cards: &[Card]) -> (u8, bool) {
    let order = trump_order(game_type);
    let Some(&top) = order.first() else {
        return (0, false);
    };
    let held: HashSet<Card> = cards.iter().copied().collect();
    let with = held.contains(&top);
    let count = order
        .iter()
        .take_while(|c| held.contains(c) == with)
        .count();
    (count as u8, with)
}

/// Every card known to have been in the declarer's possession (hand plus skat).
fn declarer_cards(data: &GameData, declarer: Player) -> Vec<Card> {
    let d = declarer.index();
    let mut cards: HashSet<Card> = data.dealt_hands[d].iter().copied().collect();
    cards.extend(data.dealt_skat.iter().copied());
    cards.extend(data.hands[d].iter().copied());
    cards.extend(data.discarded.iter().copied());
    for trick in &data.tricks {
        cards.extend(
            trick
                .plays
                .iter()
                .filter(|(p, _)| *p == declarer)
                .map(|&(_, c)| c),
        );
    }
    let mut v: Vec<Card> = cards.into_iter().collect();
    v.sort();
    v
}

/// Card points collected per seat from completed tricks.
fn trick_points(data: &GameData) -> ([u8; PLAYERS], [u8; PLAYERS]) {
    let mut points = [0u8; PLAYERS];
    let mut tricks = [0u8; PLAYERS];
    for trick in &data.tricks {
        if let Some(w) = trick.winner() {
            points[w.index()] = points[w.index()].saturating_add(trick.points());
            tricks[w.index()] += 1;
        }
    }
    (points, tricks)
}

/// Cards not yet won by anybody: hands plus an unfinished trick.
fn remaining_cards(data: &GameData) -> Vec<Card> {
    let mut cards: Vec<Card> = data.hands.iter().flatten().copied().collect();
    if let Some(trick) = data.tricks.last() {
        if trick.winner().is_none() {
            cards.extend(trick.cards());
        }
    }
    cards
}

/// Cards the declarer scores from the skat.
fn skat_cards(data: &GameData) -> &[Card] {
    if !data.discarded.is_empty() {
        &data.discarded
    } else if !data.skat.is_empty() {
        &data.skat
    } else {
        &data.dealt_skat
    }
}

/// Value of a lost overbid game: smallest multiple of the base value reaching the bid.
fn overbid_value(base: u16, bid: u16) -> u16 {
    if base == 0 {
        return 0;
    }
    bid.div_ceil(base) * base
}

/// Compute the result of a finished (or prematurely ended) game.
pub fn compute_result(data: &GameData, rules: &RulesConfig) -> Result<GameResult, DomainError> {
    let premature = data.premature_end.is_some();
    match data.game_type() {
        Some(GameType::PassedIn) => Ok(GameResult {
            passed_in: true,
            premature,
            ..GameResult::default()
        }),
        Some(GameType::Ramsch) => Ok(ramsch_result(data, rules)),
        Some(_) => {
            let announcement = data
                .announcement
                .as_ref()
                .ok_or_else(|| DomainError::validation_other("announcement missing"))?;
            let declarer = data.declarer.ok_or_else(|| {
                DomainError::validation_other("Invariant violated: declarer must be set (score)")
            })?;
            if announcement.game_type == GameType::Null {
                Ok(null_result(data, announcement, declarer))
            } else {
                Ok(trump_game_result(data, announcement, declarer))
            }
        }
        // Ended before any game was announced.
        None => Ok(GameResult {
            premature,
            ..GameResult::default()
        }),
    }
}

fn null_result(data: &GameData, ann: &GameAnnouncement, declarer: Player) -> GameResult {
    let (_, tricks) = trick_points(data);
    let declarer_tricks = tricks[declarer.index()];
    let base = base_value(GameType::Null, ann.hand, ann.ouvert);

    let mut won = declarer_tricks == 0;
    if let Some(end) = data.premature_end {
        if end.player == declarer {
            won = false;
        }
    }

    let mut value = base;
    let overbid = value < data.bid_value;
    if overbid {
        won = false;
        value = overbid_value(base, data.bid_value);
    }

    GameResult {
        declarer_tricks,
        won,
        overbid,
        multiplier: 1,
        game_value: signed_value(won, value),
        premature: data.premature_end.is_some(),
        ..GameResult::default()
    }
}

fn trump_game_result(data: &GameData, ann: &GameAnnouncement, declarer: Player) -> GameResult {
    let (points, tricks) = trick_points(data);
    let d = declarer.index();
    let mut declarer_points = points[d].saturating_add(card_points(skat_cards(data)));
    let mut declarer_tricks = tricks[d];
    let opponent_points: u8 = Player::ALL
        .iter()
        .filter(|&&p| p != declarer)
        .map(|p| points[p.index()])
        .sum();
    let mut completed = data.completed_tricks();

    let mut declarer_gave_up = false;
    if let Some(end) = data.premature_end {
        if end.player == declarer {
            declarer_gave_up = true;
        } else {
            // Opponent ended: everything still in play belongs to the declarer.
            declarer_points = declarer_points.saturating_add(card_points(&remaining_cards(data)));
            let open_tricks = TRICKS_PER_GAME.saturating_sub(completed) as u8;
            declarer_tricks += open_tricks;
            completed = TRICKS_PER_GAME;
        }
    }

    let schneider = declarer_points >= SCHNEIDER_THRESHOLD || opponent_points >= SCHNEIDER_THRESHOLD;
    let schwarz = completed == TRICKS_PER_GAME
        && (declarer_tricks as usize == TRICKS_PER_GAME || declarer_tricks == 0);

    // No trump at all is "ohne" every matador: 11 in suit games, 4 in Grand.
    let (matadors, with_matadors) = count_matadors(ann.game_type, &declarer_cards(data, declarer));

    let multiplier = 1
        + matadors as u16
        + ann.hand as u16
        + (schneider || ann.schneider) as u16
        + ann.schneider as u16
        + (schwarz || ann.schwarz) as u16
        + ann.schwarz as u16
        + ann.ouvert as u16;

    let mut won = !declarer_gave_up
        && declarer_points >= WIN_THRESHOLD
        && (!ann.schneider || declarer_points >= SCHNEIDER_THRESHOLD)
        && (!ann.schwarz || declarer_tricks as usize == TRICKS_PER_GAME);

    let base = base_value(ann.game_type, ann.hand, ann.ouvert);
    let mut value = base * multiplier;
    let overbid = value < data.bid_value;
    if overbid {
        won = false;
        value = overbid_value(base, data.bid_value);
    }

    GameResult {
        declarer_points,
        opponent_points,
        declarer_tricks,
        won,
        schneider,
        schwarz,
        overbid,
        matadors,
        with_matadors,
        multiplier,
        game_value: signed_value(won, value),
        premature: data.premature_end.is_some(),
        ..GameResult::default()
    }
}

fn signed_value(won: bool, value: u16) -> i32 {
    if won {
        value as i32
    } else {
        -2 * value as i32
    }
}

fn ramsch_result(data: &GameData, rules: &RulesConfig) -> GameResult {
    let (mut points, tricks) = trick_points(data);

    if let Some(end) = data.premature_end {
        let i = end.player.index();
        points[i] = points[i].saturating_add(card_points(&remaining_cards(data)));
    }

    if rules.ramsch_skat_owner == RamschSkatOwner::LastTrick {
        if let Some(last) = data.tricks.iter().rev().find_map(|t| t.winner()) {
            let skat = skat_cards(data);
            points[last.index()] = points[last.index()].saturating_add(card_points(skat));
        }
    }

    let mut scores = [0i32; PLAYERS];
    let durchmarsch_by = Player::ALL
        .into_iter()
        .find(|p| tricks[p.index()] as usize == TRICKS_PER_GAME);
    let mut result = GameResult {
        ramsch_points: Some(points),
        premature: data.premature_end.is_some(),
        multiplier: 1,
        ..GameResult::default()
    };

    if let Some(winner) = durchmarsch_by {
        scores[winner.index()] = DURCHMARSCH_VALUE;
        result.durchmarsch = true;
        result.won = true;
        result.game_value = DURCHMARSCH_VALUE;
        result.ramsch_scores = Some(scores);
        return result;
    }

    let jungfrau =
        data.completed_tricks() == TRICKS_PER_GAME && tricks.iter().any(|&t| t == 0);
    let factor = if jungfrau { 2 } else { 1 };
    let max = points.iter().copied().max().unwrap_or(0);
    for p in Player::ALL {
        if points[p.index()] == max {
            scores[p.index()] = -(max as i32) * factor;
        }
    }

    result.jungfrau = jungfrau;
    result.multiplier = factor as u16;
    result.game_value = -(max as i32) * factor;
    result.ramsch_scores = Some(scores);
    result
}
