#![allow(dead_code)]

use std::sync::Arc;

use skat_engine::domain::{deal_cards, DealtCards, Player};
use skat_engine::services::random::RandomPlayer;
use skat_engine::PlayerSource;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    engine_test_support::logging::init();
}

/// An open deal from `seed`.
pub fn open_deal(seed: u64) -> DealtCards {
    let (hands, skat) = deal_cards(seed);
    DealtCards::open(hands, skat)
}

/// Three seeded random players, one per seat.
pub fn random_seats(seed: u64) -> [Arc<dyn PlayerSource>; 3] {
    Player::ALL.map(|p| {
        Arc::new(RandomPlayer::new(
            format!("rnd{}", p.index()),
            Some(seed.wrapping_add(p.index() as u64)),
        )) as Arc<dyn PlayerSource>
    })
}
