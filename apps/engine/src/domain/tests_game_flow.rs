use crate::config::rules::RulesConfig;
use crate::domain::announcement::GameAnnouncement;
use crate::domain::cards_types::{CardSlot, GameType};
use crate::domain::dealing::deal_cards;
use crate::domain::fixtures::CardFixtures;
use crate::domain::game_flow::{apply_move, start_dealing};
use crate::domain::game_transition::GameTransition;
use crate::domain::moves::{DealtCards, MoveInformation, MoveKind};
use crate::domain::state::{GameState, Phase, Player};
use crate::domain::tricks::legal_moves;
use crate::errors::domain::ValidationKind;

use Player::*;

fn crafted_deal() -> DealtCards {
    DealtCards::open(
        [
            CardFixtures::parse_hardcoded(&[
                "CJ", "SJ", "HJ", "DJ", "CA", "CT", "CK", "CQ", "C9", "C8",
            ]),
            CardFixtures::parse_hardcoded(&[
                "SA", "ST", "SK", "SQ", "S9", "S8", "S7", "C7", "HA", "HT",
            ]),
            CardFixtures::parse_hardcoded(&[
                "HK", "HQ", "H9", "H8", "H7", "DA", "DT", "DK", "DQ", "D9",
            ]),
        ],
        CardFixtures::parse_hardcoded(&["D8", "D7"]),
    )
}

fn dealt_state(rules: RulesConfig, dealt: DealtCards) -> GameState {
    let mut state = GameState::new(rules);
    start_dealing(&mut state).unwrap();
    apply_move(&mut state, &MoveInformation::world(MoveKind::Deal(dealt))).unwrap();
    state
}

fn mv(state: &mut GameState, who: Player, kind: MoveKind) {
    apply_move(state, &MoveInformation::new(who, kind)).expect("legal move");
}

/// Play out the remaining tricks with the first legal card each turn.
fn play_out(state: &mut GameState) {
    while state.phase == Phase::TrickPlaying {
        let who = state.turn.expect("someone to act");
        let card = legal_moves(state, who)[0];
        mv(state, who, MoveKind::CardPlay(card));
    }
}

#[test]
fn deal_starts_bidding_with_middlehand() {
    let state = dealt_state(RulesConfig::default(), crafted_deal());
    assert_eq!(state.phase, Phase::Bidding);
    assert_eq!(state.turn, Some(Middlehand));
    for p in Player::ALL {
        assert_eq!(state.data.hands[p.index()].len(), 10);
    }
    assert_eq!(state.data.skat.len(), 2);
}

#[test]
fn deal_requires_dealing_phase_and_world() {
    let mut state = GameState::new(RulesConfig::default());
    let deal = MoveInformation::world(MoveKind::Deal(crafted_deal()));
    let err = apply_move(&mut state, &deal).unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::PhaseMismatch));

    start_dealing(&mut state).unwrap();
    let from_seat = MoveInformation::new(Forehand, MoveKind::Deal(crafted_deal()));
    assert!(apply_move(&mut state, &from_seat).is_err());
    assert_eq!(state.phase, Phase::Dealing);
}

#[test]
fn invalid_deal_is_rejected() {
    let mut dealt = crafted_deal();
    dealt.skat[0] = dealt.hands[0][0].clone();
    let mut state = GameState::new(RulesConfig::default());
    start_dealing(&mut state).unwrap();
    let err = apply_move(&mut state, &MoveInformation::world(MoveKind::Deal(dealt))).unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::InvalidDeal));
    assert_eq!(state.phase, Phase::Dealing);
}

#[test]
fn rejected_move_leaves_state_unchanged() {
    let mut state = dealt_state(RulesConfig::default(), crafted_deal());
    let before_bids = state.data.bids.clone();
    let card = CardFixtures::card("SA");
    let err = apply_move(
        &mut state,
        &MoveInformation::new(Middlehand, MoveKind::CardPlay(card)),
    )
    .unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::PhaseMismatch));
    assert_eq!(state.phase, Phase::Bidding);
    assert_eq!(state.data.bids, before_bids);
    assert_eq!(state.data.hands[Middlehand.index()].len(), 10);

    // Out of turn bid
    let err = apply_move(&mut state, &MoveInformation::new(Rearhand, MoveKind::Bid(18)))
        .unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::OutOfTurn));
    assert_eq!(state.turn, Some(Middlehand));
}

#[test]
fn full_game_with_skat_pickup_and_following() {
    let mut state = dealt_state(RulesConfig::default(), crafted_deal());
    mv(&mut state, Middlehand, MoveKind::Bid(18));
    mv(&mut state, Forehand, MoveKind::HoldBid);
    mv(&mut state, Middlehand, MoveKind::Pass);
    assert_eq!(state.turn, Some(Rearhand));
    mv(&mut state, Rearhand, MoveKind::Pass);
    assert_eq!(state.phase, Phase::Declaring);
    assert_eq!(state.data.declarer, Some(Forehand));
    assert_eq!(state.data.bid_value, 18);

    // Non-hand game without skat first is rejected
    let clubs = GameAnnouncement::new(GameType::Clubs)
        .with_discards(CardFixtures::parse_hardcoded(&["D8", "D7"]));
    assert!(apply_move(
        &mut state,
        &MoveInformation::new(Forehand, MoveKind::announce(clubs.clone()))
    )
    .is_err());

    mv(&mut state, Forehand, MoveKind::SkatRequest);
    assert_eq!(state.phase, Phase::Discarding);
    assert_eq!(state.data.hands[Forehand.index()].len(), 12);

    // Discarding a card not held fails
    let bad = GameAnnouncement::new(GameType::Clubs)
        .with_discards(CardFixtures::parse_hardcoded(&["SA", "D7"]));
    let err = apply_move(
        &mut state,
        &MoveInformation::new(Forehand, MoveKind::announce(bad)),
    )
    .unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::InvalidDiscard));

    mv(&mut state, Forehand, MoveKind::announce(clubs));
    assert_eq!(state.phase, Phase::TrickPlaying);
    assert_eq!(state.turn, Some(Forehand));
    assert_eq!(state.data.hands[Forehand.index()].len(), 10);
    assert_eq!(state.data.discarded.len(), 2);

    mv(&mut state, Forehand, MoveKind::CardPlay(CardFixtures::card("CJ")));
    // Middlehand holds C7 (trump) and must play it
    let err = apply_move(
        &mut state,
        &MoveInformation::new(Middlehand, MoveKind::CardPlay(CardFixtures::card("HA"))),
    )
    .unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::MustFollowSuit));
    assert_eq!(
        legal_moves(&state, Middlehand),
        CardFixtures::parse_hardcoded(&["C7"])
    );
    mv(&mut state, Middlehand, MoveKind::CardPlay(CardFixtures::card("C7")));
    let transitions = apply_move(
        &mut state,
        &MoveInformation::new(Rearhand, MoveKind::CardPlay(CardFixtures::card("HK"))),
    )
    .unwrap();
    assert!(transitions.contains(&GameTransition::TrickCompleted {
        number: 0,
        winner: Forehand
    }));
    assert_eq!(state.turn, Some(Forehand));

    play_out(&mut state);
    assert_eq!(state.phase, Phase::GameOver);
    assert_eq!(state.data.tricks.len(), 10);
    assert!(state.data.tricks.iter().all(|t| t.winner().is_some()));
    let result = state.result().expect("result");
    assert_eq!(result.declarer_points + result.opponent_points, 120);
    assert_eq!(result.matadors, 10);
    assert!(result.with_matadors);
}

#[test]
fn hand_game_goes_straight_to_trick_play() {
    let mut state = dealt_state(RulesConfig::default(), crafted_deal());
    mv(&mut state, Middlehand, MoveKind::Pass);
    mv(&mut state, Rearhand, MoveKind::Pass);
    assert_eq!(state.turn, Some(Forehand));
    mv(&mut state, Forehand, MoveKind::Bid(18));
    assert_eq!(state.data.declarer, Some(Forehand));

    mv(
        &mut state,
        Forehand,
        MoveKind::announce(GameAnnouncement::new(GameType::Grand).hand()),
    );
    assert_eq!(state.phase, Phase::TrickPlaying);
    assert_eq!(state.data.skat.len(), 2);
    play_out(&mut state);
    let result = state.result().unwrap();
    assert_eq!(result.declarer_points + result.opponent_points, 120);
}

#[test]
fn all_pass_is_passed_in_without_ramsch() {
    let mut state = dealt_state(RulesConfig::default(), crafted_deal());
    mv(&mut state, Middlehand, MoveKind::Pass);
    mv(&mut state, Rearhand, MoveKind::Pass);
    mv(&mut state, Forehand, MoveKind::Pass);
    assert_eq!(state.phase, Phase::GameOver);
    assert_eq!(state.game_type(), Some(GameType::PassedIn));
    let result = state.result().unwrap();
    assert!(result.passed_in);
    assert_eq!(result.game_value, 0);
}

#[test]
fn all_pass_plays_ramsch_when_enabled() {
    let rules = RulesConfig {
        play_ramsch: true,
        ..RulesConfig::default()
    };
    let (hands, skat) = deal_cards(99);
    let mut state = dealt_state(rules, DealtCards::open(hands, skat));
    mv(&mut state, Middlehand, MoveKind::Pass);
    mv(&mut state, Rearhand, MoveKind::Pass);
    mv(&mut state, Forehand, MoveKind::Pass);
    assert_eq!(state.phase, Phase::TrickPlaying);
    assert_eq!(state.game_type(), Some(GameType::Ramsch));
    play_out(&mut state);
    let result = state.result().unwrap();
    let points = result.ramsch_points.expect("ramsch points");
    assert_eq!(points.iter().map(|&p| p as u32).sum::<u32>(), 120);
    assert!(result.game_value < 0 || result.durchmarsch);
}

#[test]
fn resign_ends_game_prematurely() {
    let mut state = dealt_state(RulesConfig::default(), crafted_deal());
    mv(&mut state, Middlehand, MoveKind::Pass);
    mv(&mut state, Rearhand, MoveKind::Pass);
    mv(&mut state, Forehand, MoveKind::Bid(18));
    mv(
        &mut state,
        Forehand,
        MoveKind::announce(GameAnnouncement::new(GameType::Clubs).hand()),
    );
    let transitions = apply_move(
        &mut state,
        &MoveInformation::new(Forehand, MoveKind::Resign),
    )
    .unwrap();
    assert!(transitions.contains(&GameTransition::GameEnded { premature: true }));
    assert_eq!(state.phase, Phase::PreliminaryEnd);
    let result = state.result().unwrap();
    assert!(result.premature);
    assert!(!result.won);
    assert!(result.game_value < 0);

    // Nothing is accepted afterwards
    assert!(apply_move(
        &mut state,
        &MoveInformation::world(MoveKind::TimeOut(Middlehand))
    )
    .is_err());
}

#[test]
fn opponent_leaving_hands_remaining_cards_to_declarer() {
    let mut state = dealt_state(RulesConfig::default(), crafted_deal());
    mv(&mut state, Middlehand, MoveKind::Pass);
    mv(&mut state, Rearhand, MoveKind::Pass);
    mv(&mut state, Forehand, MoveKind::Bid(18));
    mv(
        &mut state,
        Forehand,
        MoveKind::announce(GameAnnouncement::new(GameType::Clubs).hand()),
    );
    mv(&mut state, Forehand, MoveKind::CardPlay(CardFixtures::card("CJ")));
    apply_move(
        &mut state,
        &MoveInformation::world(MoveKind::LeaveTable(Rearhand)),
    )
    .unwrap();
    let result = state.result().unwrap();
    assert_eq!(result.declarer_points, 120);
    assert!(result.won);
    assert!(result.schwarz);
}

#[test]
fn hidden_hands_accept_unseen_cards() {
    let mut dealt = crafted_deal();
    dealt.hands[Middlehand.index()] = vec![CardSlot::Hidden; 10];
    dealt.hands[Rearhand.index()] = vec![CardSlot::Hidden; 10];
    dealt.skat = vec![CardSlot::Hidden; 2];
    let mut state = dealt_state(RulesConfig::default(), dealt);
    assert_eq!(state.data.hidden, [0, 10, 10]);

    mv(&mut state, Middlehand, MoveKind::Pass);
    mv(&mut state, Rearhand, MoveKind::Bid(18));
    mv(&mut state, Forehand, MoveKind::Pass);
    assert_eq!(state.data.declarer, Some(Rearhand));
    mv(&mut state, Rearhand, MoveKind::SkatRequest);
    assert_eq!(state.data.hidden[Rearhand.index()], 12);
    // Discards unseen by this viewer
    mv(
        &mut state,
        Rearhand,
        MoveKind::announce(GameAnnouncement::new(GameType::Hearts)),
    );
    assert_eq!(state.data.hidden[Rearhand.index()], 10);

    mv(&mut state, Forehand, MoveKind::CardPlay(CardFixtures::card("CA")));
    // Middlehand's cards are unknown here, any card is accepted
    mv(&mut state, Middlehand, MoveKind::CardPlay(CardFixtures::card("SA")));
    assert_eq!(state.data.hidden[Middlehand.index()], 9);
    // A card already on the table cannot be played twice
    let err = apply_move(
        &mut state,
        &MoveInformation::new(Rearhand, MoveKind::CardPlay(CardFixtures::card("SA"))),
    )
    .unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::CardAlreadyPlayed));
}

#[test]
fn unreadable_discard_still_leaves_the_hand() {
    let mut dealt = crafted_deal();
    dealt.hands[Middlehand.index()] = vec![CardSlot::Hidden; 10];
    dealt.hands[Rearhand.index()] = vec![CardSlot::Hidden; 10];
    dealt.skat = vec![CardSlot::Hidden; 2];
    let mut state = dealt_state(RulesConfig::default(), dealt);
    mv(&mut state, Middlehand, MoveKind::Pass);
    mv(&mut state, Rearhand, MoveKind::Bid(18));
    mv(&mut state, Forehand, MoveKind::Pass);
    mv(&mut state, Rearhand, MoveKind::SkatRequest);

    let mut hearts = GameAnnouncement::new(GameType::Hearts);
    hearts.discarded = vec![
        CardSlot::Unknown("X1".into()),
        CardSlot::Known(CardFixtures::card("D8")),
    ];
    let mut announce = MoveInformation::new(Rearhand, MoveKind::announce(hearts));
    announce.degraded = true;
    apply_move(&mut state, &announce).unwrap();

    assert_eq!(state.phase, Phase::TrickPlaying);
    assert_eq!(state.data.hidden[Rearhand.index()], 10);
    assert_eq!(state.data.discarded, CardFixtures::parse_hardcoded(&["D8"]));
    assert_eq!(state.data.skat_hidden, 1);
    assert!(state.data.degraded);
}
