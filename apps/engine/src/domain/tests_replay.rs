use crate::config::rules::RulesConfig;
use crate::domain::announcement::GameAnnouncement;
use crate::domain::cards_types::{CardSlot, GameType};
use crate::domain::dealing::deal_cards;
use crate::domain::fixtures::CardFixtures;
use crate::domain::game_flow::{apply_move, replay_move, start_dealing};
use crate::domain::moves::{DealtCards, MoveInformation, MoveKind};
use crate::domain::state::{BidAction, GameState, Phase, Player};
use crate::domain::tricks::legal_moves;

use Player::*;

fn replay_all(state: &mut GameState, moves: &[MoveInformation]) {
    for mv in moves {
        replay_move(state, mv);
    }
}

fn seat(who: Player, kind: MoveKind) -> MoveInformation {
    MoveInformation::new(who, kind)
}

#[test]
fn replay_matches_checked_play() {
    let (hands, skat) = deal_cards(2024);
    let mut checked = GameState::new(RulesConfig::default());
    start_dealing(&mut checked).unwrap();

    let mut moves = vec![
        MoveInformation::world(MoveKind::Deal(DealtCards::open(hands, skat))),
        seat(Middlehand, MoveKind::Pass),
        seat(Rearhand, MoveKind::Pass),
        seat(Forehand, MoveKind::Bid(18)),
        seat(
            Forehand,
            MoveKind::announce(GameAnnouncement::new(GameType::Grand).hand()),
        ),
    ];
    for mv in &moves {
        apply_move(&mut checked, mv).unwrap();
    }
    while checked.phase == Phase::TrickPlaying {
        let who = checked.turn.unwrap();
        let mv = seat(who, MoveKind::CardPlay(legal_moves(&checked, who)[0]));
        apply_move(&mut checked, &mv).unwrap();
        moves.push(mv);
    }

    let mut replayed = GameState::new(RulesConfig::default());
    replay_all(&mut replayed, &moves);
    assert_eq!(replayed.phase, Phase::GameOver);
    assert_eq!(replayed.data.declarer, Some(Forehand));
    assert_eq!(replayed.data.tricks, checked.data.tricks);
    assert_eq!(replayed.result(), checked.result());
}

#[test]
fn unknown_game_type_takes_winner_from_next_lead() {
    let (hands, skat) = deal_cards(5);
    let fore = hands[Forehand.index()][0];
    let middle = hands[Middlehand.index()][0];
    let rear = hands[Rearhand.index()][0];
    let next = hands[Middlehand.index()][1];

    let mut state = GameState::new(RulesConfig::default());
    replay_all(
        &mut state,
        &[
            MoveInformation::world(MoveKind::Deal(DealtCards::open(hands, skat))),
            seat(Forehand, MoveKind::CardPlay(fore)),
            seat(Middlehand, MoveKind::CardPlay(middle)),
            seat(Rearhand, MoveKind::CardPlay(rear)),
        ],
    );
    assert_eq!(state.data.tricks.len(), 1);
    assert!(state.data.tricks[0].is_complete());
    assert_eq!(state.data.tricks[0].winner(), None);
    assert_eq!(state.turn, None);

    replay_move(&mut state, &seat(Middlehand, MoveKind::CardPlay(next)));
    assert_eq!(state.data.tricks[0].winner(), Some(Middlehand));
    assert_eq!(state.data.tricks[1].leader, Middlehand);
    assert_eq!(state.data.hands[Middlehand.index()].len(), 8);
}

#[test]
fn replay_accepts_moves_the_checked_path_rejects() {
    let mut state = GameState::new(RulesConfig::default());
    let dealt = DealtCards {
        hands: [
            vec![CardSlot::Hidden; 10],
            vec![CardSlot::Hidden; 10],
            vec![CardSlot::Hidden; 10],
        ],
        skat: vec![CardSlot::Hidden; 2],
    };
    replay_move(&mut state, &MoveInformation::world(MoveKind::Deal(dealt)));
    assert_eq!(state.phase, Phase::Bidding);

    // Out-of-turn bid: recorded, auction untouched
    let bid = seat(Rearhand, MoveKind::Bid(20));
    assert!(apply_move(&mut state.clone(), &bid).is_err());
    replay_move(&mut state, &bid);
    assert_eq!(state.data.bids.last().map(|b| b.action), Some(BidAction::Bid(20)));
    assert_eq!(state.data.bid_value, 20);
    assert_eq!(state.turn, Some(Middlehand));

    // Skat pickup and discards nobody can see
    replay_move(&mut state, &seat(Rearhand, MoveKind::SkatRequest));
    assert_eq!(state.data.declarer, Some(Rearhand));
    assert_eq!(state.data.hidden[Rearhand.index()], 12);
    let ann = GameAnnouncement::new(GameType::Spades)
        .with_discards(CardFixtures::parse_hardcoded(&["D7", "D8"]));
    replay_move(&mut state, &seat(Rearhand, MoveKind::announce(ann)));
    assert_eq!(state.phase, Phase::TrickPlaying);
    assert_eq!(state.data.hidden[Rearhand.index()], 10);
    assert_eq!(state.data.discarded.len(), 2);

    replay_move(
        &mut state,
        &MoveInformation::world(MoveKind::LeaveTable(Middlehand)),
    );
    assert_eq!(state.phase, Phase::PreliminaryEnd);
    assert!(state.result().is_some_and(|r| r.premature));
}

#[test]
fn degraded_move_marks_the_game() {
    let mut state = GameState::new(RulesConfig::default());
    let mut mv = seat(Forehand, MoveKind::Pass);
    mv.degraded = true;
    replay_move(&mut state, &mv);
    assert!(state.data.degraded);
}

fn all_pass_moves(seed: u64) -> Vec<MoveInformation> {
    let (hands, skat) = deal_cards(seed);
    vec![
        MoveInformation::world(MoveKind::Deal(DealtCards::open(hands, skat))),
        seat(Middlehand, MoveKind::Pass),
        seat(Rearhand, MoveKind::Pass),
        seat(Forehand, MoveKind::Pass),
    ]
}

fn play_checked(rules: RulesConfig, moves: &[MoveInformation]) -> GameState {
    let mut state = GameState::new(rules);
    start_dealing(&mut state).unwrap();
    for mv in moves {
        apply_move(&mut state, mv).unwrap();
    }
    state
}

#[test]
fn replayed_all_pass_is_passed_in() {
    let moves = all_pass_moves(17);
    let checked = play_checked(RulesConfig::default(), &moves);

    let mut replayed = GameState::new(RulesConfig::default());
    replay_all(&mut replayed, &moves);
    assert_eq!(replayed.phase, Phase::GameOver);
    assert_eq!(replayed.game_type(), Some(GameType::PassedIn));
    assert!(replayed.result().is_some_and(|r| r.passed_in));
    assert_eq!(replayed.result(), checked.result());
}

#[test]
fn replayed_all_pass_starts_ramsch_when_enabled() {
    let rules = RulesConfig {
        play_ramsch: true,
        ..RulesConfig::default()
    };
    let moves = all_pass_moves(18);
    let checked = play_checked(rules.clone(), &moves);

    let mut replayed = GameState::new(rules);
    replay_all(&mut replayed, &moves);
    assert_eq!(replayed.phase, Phase::TrickPlaying);
    assert_eq!(replayed.game_type(), Some(GameType::Ramsch));
    assert_eq!(replayed.turn, checked.turn);
}
