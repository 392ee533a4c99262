use crate::config::rules::{RamschSkatOwner, RulesConfig};
use crate::domain::announcement::GameAnnouncement;
use crate::domain::cards_types::{card_points, GameType};
use crate::domain::dealing::full_deck;
use crate::domain::fixtures::CardFixtures;
use crate::domain::scoring::compute_result;
use crate::domain::state::{EndReason, GameData, Player, PrematureEnd, Trick};

use Player::*;

/// Complete trick led by `leader`, cards in play order.
fn trick(number: u8, leader: Player, cards: [&str; 3], winner: Player) -> Trick {
    let mut t = Trick::new(number, leader);
    let mut seat = leader;
    for card in CardFixtures::parse_hardcoded(&cards) {
        t.plays.push((seat, card));
        seat = seat.left_neighbour();
    }
    t.set_winner(winner).unwrap();
    t
}

fn clubs_game(declarer_hand: &[&str], bid: u16) -> GameData {
    GameData {
        dealt_hands: [
            CardFixtures::parse_hardcoded(declarer_hand),
            Vec::new(),
            Vec::new(),
        ],
        discarded: CardFixtures::parse_hardcoded(&["D8", "D7"]),
        announcement: Some(GameAnnouncement::new(GameType::Clubs)),
        declarer: Some(Forehand),
        bid_value: bid,
        tricks: vec![
            trick(0, Forehand, ["CA", "HA", "ST"], Forehand),
            trick(1, Forehand, ["CT", "HT", "S7"], Forehand),
            trick(2, Forehand, ["CK", "H7", "D9"], Forehand),
            trick(3, Forehand, ["CQ", "HK", "DQ"], Forehand),
        ],
        ..GameData::default()
    }
}

const MIT_TWO: [&str; 10] = ["CJ", "SJ", "CA", "CT", "CK", "CQ", "C9", "C8", "S9", "H9"];

#[test]
fn clubs_mit_two_wins_36() {
    let data = clubs_game(&MIT_TWO, 18);
    let r = compute_result(&data, &RulesConfig::default()).unwrap();
    assert_eq!(r.declarer_points, 66);
    assert_eq!((r.matadors, r.with_matadors), (2, true));
    assert_eq!(r.multiplier, 3);
    assert!(r.won);
    assert!(!r.schneider);
    assert!(!r.schwarz);
    assert_eq!(r.game_value, 36);
}

#[test]
fn overbid_game_loses_double_rounded_value() {
    // Mit 1, game value 24, bid 40 rounds to 48
    let data = clubs_game(
        &["CJ", "HJ", "CA", "CT", "CK", "CQ", "C9", "C8", "S9", "H9"],
        40,
    );
    let r = compute_result(&data, &RulesConfig::default()).unwrap();
    assert!(r.overbid);
    assert!(!r.won);
    assert_eq!(r.game_value, -96);
}

#[test]
fn schneider_reached_adds_a_level() {
    let mut data = clubs_game(&MIT_TWO, 18);
    data.tricks
        .push(trick(4, Forehand, ["SA", "DA", "DT"], Forehand));
    let r = compute_result(&data, &RulesConfig::default()).unwrap();
    assert_eq!(r.declarer_points, 98);
    assert!(r.schneider);
    assert_eq!(r.multiplier, 4);
    assert_eq!(r.game_value, 48);
}

#[test]
fn announced_schneider_missed_loses() {
    let mut data = clubs_game(&MIT_TWO, 18);
    data.announcement = Some(GameAnnouncement::new(GameType::Grand).hand().schneider());
    data.discarded.clear();
    data.skat = CardFixtures::parse_hardcoded(&["D8", "D7"]);
    let r = compute_result(&data, &RulesConfig::default()).unwrap();
    assert!(!r.won);
    // Grand mit 2, hand, schneider announced: 1 + 2 + 1 + 2
    assert_eq!(r.multiplier, 6);
    assert_eq!(r.game_value, -2 * 24 * 6);
}

#[test]
fn losing_under_thirty_is_schneider() {
    let mut data = clubs_game(&MIT_TWO, 18);
    data.tricks = vec![
        trick(0, Forehand, ["C7", "SA", "ST"], Middlehand),
        trick(1, Middlehand, ["HA", "HT", "DA"], Middlehand),
        trick(2, Middlehand, ["DT", "HK", "SK"], Rearhand),
        trick(3, Rearhand, ["CA", "CT", "D9"], Rearhand),
    ];
    let r = compute_result(&data, &RulesConfig::default()).unwrap();
    assert_eq!(r.declarer_points, 0);
    assert_eq!(r.opponent_points, 92);
    assert!(r.schneider);
    assert!(!r.won);
    assert_eq!(r.game_value, -2 * 12 * 4);
}

fn null_game(declarer_takes_trick: bool) -> GameData {
    let winner = if declarer_takes_trick { Forehand } else { Middlehand };
    GameData {
        announcement: Some(GameAnnouncement::new(GameType::Null).hand().ouvert()),
        declarer: Some(Forehand),
        bid_value: 59,
        tricks: vec![trick(0, Forehand, ["C7", "CA", "CT"], winner)],
        ..GameData::default()
    }
}

#[test]
fn null_hand_ouvert_won_and_lost() {
    let won = compute_result(&null_game(false), &RulesConfig::default()).unwrap();
    assert!(won.won);
    assert_eq!(won.game_value, 59);

    let lost = compute_result(&null_game(true), &RulesConfig::default()).unwrap();
    assert!(!lost.won);
    assert_eq!(lost.declarer_tricks, 1);
    assert_eq!(lost.game_value, -118);
}

#[test]
fn declarer_resigning_loses() {
    let mut data = clubs_game(&MIT_TWO, 18);
    data.premature_end = Some(PrematureEnd {
        reason: EndReason::Resign,
        player: Forehand,
    });
    let r = compute_result(&data, &RulesConfig::default()).unwrap();
    assert!(r.premature);
    assert!(!r.won);
    assert_eq!(r.game_value, -72);
}

fn ramsch(tricks: Vec<Trick>, skat: &[&str]) -> GameData {
    GameData {
        announcement: Some(GameAnnouncement::new(GameType::Ramsch)),
        skat: CardFixtures::parse_hardcoded(skat),
        tricks,
        ..GameData::default()
    }
}

fn short_ramsch() -> GameData {
    ramsch(
        vec![
            trick(0, Forehand, ["CA", "SA", "HA"], Forehand),
            trick(1, Forehand, ["CT", "ST", "HT"], Middlehand),
            trick(2, Middlehand, ["C7", "S7", "H7"], Middlehand),
        ],
        &["DA", "DT"],
    )
}

#[test]
fn ramsch_skat_goes_to_last_trick_winner() {
    let r = compute_result(&short_ramsch(), &RulesConfig::default()).unwrap();
    assert_eq!(r.ramsch_points, Some([33, 51, 0]));
    assert_eq!(r.ramsch_scores, Some([0, -51, 0]));
    assert_eq!(r.game_value, -51);
    assert!(!r.jungfrau);
}

#[test]
fn ramsch_skat_can_stay_out_of_play() {
    let rules = RulesConfig {
        ramsch_skat_owner: RamschSkatOwner::Discarded,
        ..RulesConfig::default()
    };
    let r = compute_result(&short_ramsch(), &rules).unwrap();
    assert_eq!(r.ramsch_points, Some([33, 30, 0]));
    assert_eq!(r.ramsch_scores, Some([-33, 0, 0]));
}

#[test]
fn ramsch_tie_makes_both_lose() {
    let data = ramsch(
        vec![
            trick(0, Forehand, ["CA", "CT", "C7"], Forehand),
            trick(1, Forehand, ["SA", "ST", "S7"], Middlehand),
            trick(2, Middlehand, ["D9", "H7", "H8"], Rearhand),
        ],
        &["D8", "D7"],
    );
    let r = compute_result(&data, &RulesConfig::default()).unwrap();
    assert_eq!(r.ramsch_scores, Some([-21, -21, 0]));
}

/// Ten tricks over the deck with winners from `winner_of`.
fn full_ramsch(winner_of: impl Fn(usize) -> Player) -> GameData {
    let deck = full_deck();
    let mut tricks = Vec::new();
    let mut leader = Forehand;
    for (i, chunk) in deck[..30].chunks(3).enumerate() {
        let mut t = Trick::new(i as u8, leader);
        let mut seat = leader;
        for &card in chunk {
            t.plays.push((seat, card));
            seat = seat.left_neighbour();
        }
        let winner = winner_of(i);
        t.set_winner(winner).unwrap();
        tricks.push(t);
        leader = winner;
    }
    GameData {
        announcement: Some(GameAnnouncement::new(GameType::Ramsch)),
        skat: deck[30..].to_vec(),
        tricks,
        ..GameData::default()
    }
}

#[test]
fn durchmarsch_scores_positive() {
    let data = full_ramsch(|_| Middlehand);
    let r = compute_result(&data, &RulesConfig::default()).unwrap();
    assert!(r.durchmarsch);
    assert!(r.won);
    assert_eq!(r.game_value, 120);
    assert_eq!(r.ramsch_scores, Some([0, 120, 0]));
}

#[test]
fn jungfrau_doubles_the_loss() {
    let data = full_ramsch(|i| if i < 5 { Forehand } else { Middlehand });
    let deck = full_deck();
    let fore = card_points(&deck[..15]);
    let middle = card_points(&deck[15..]);
    let r = compute_result(&data, &RulesConfig::default()).unwrap();
    assert!(r.jungfrau);
    assert_eq!(r.ramsch_points, Some([fore, middle, 0]));
    let max = fore.max(middle) as i32;
    assert_eq!(r.game_value, -2 * max);
}

#[test]
fn ramsch_player_ending_takes_remaining_cards() {
    let mut data = short_ramsch();
    data.hands[Rearhand.index()] = CardFixtures::parse_hardcoded(&["DK", "DQ"]);
    data.premature_end = Some(PrematureEnd {
        reason: EndReason::TimeOut,
        player: Rearhand,
    });
    let r = compute_result(&data, &RulesConfig::default()).unwrap();
    assert!(r.premature);
    assert_eq!(r.ramsch_points, Some([33, 51, 7]));
}
