//! Deterministic card dealing and deal validation.

use std::collections::HashSet;

use crate::domain::cards_types::{Card, CardSlot, Rank, Suit};
use crate::domain::moves::DealtCards;
use crate::domain::rules::{DECK_SIZE, HAND_SIZE, PLAYERS, SKAT_SIZE};
use crate::errors::domain::{DomainError, ValidationKind};

/// The 32-card Skat deck in a fixed order.
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            deck.push(Card { suit, rank });
        }
    }
    deck
}

/// SplitMix64-style generator: fast and deterministic given a seed.
struct SimpleLcg {
    state: u64,
}

impl SimpleLcg {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.state;
        z ^= z >> 30;
        z = z.wrapping_mul(0xBF58476D1CE4E5B9);
        z ^= z >> 27;
        z = z.wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }

    fn next_range(&mut self, max: usize) -> usize {
        let m = max as u64;
        // Rejection sampling avoids modulo bias.
        let limit = u64::MAX - (u64::MAX % m);
        loop {
            let x = self.next();
            if x < limit {
                return (x % m) as usize;
            }
        }
    }
}

/// Fisher-Yates shuffle using the deterministic generator.
fn shuffle_with_seed(deck: &mut [Card], seed: u64) {
    let mut rng = SimpleLcg::new(seed);
    for i in (1..deck.len()).rev() {
        let j = rng.next_range(i + 1);
        deck.swap(i, j);
    }
}

/// Shuffle and deal 10 cards to each seat plus a 2-card skat.
///
/// Hands are sorted; the skat keeps deal order.
pub fn deal_cards(seed: u64) -> ([Vec<Card>; PLAYERS], Vec<Card>) {
    let mut deck = full_deck();
    shuffle_with_seed(&mut deck, seed);

    let mut hands: [Vec<Card>; PLAYERS] = Default::default();
    for (seat, hand_slot) in hands.iter_mut().enumerate() {
        let start = seat * HAND_SIZE;
        let mut hand = deck[start..start + HAND_SIZE].to_vec();
        hand.sort();
        *hand_slot = hand;
    }
    let skat = deck[PLAYERS * HAND_SIZE..].to_vec();
    (hands, skat)
}

/// Check a deal: 10/10/10/2 slots and no known card twice.
///
/// Hidden slots are allowed (remote views); unknown codes are not rejected here,
/// the caller marks the game degraded instead.
pub fn validate_deal(dealt: &DealtCards) -> Result<(), DomainError> {
    if !dealt.has_standard_shape() {
        let sizes: Vec<usize> = dealt.hands.iter().map(Vec::len).collect();
        return Err(DomainError::validation(
            ValidationKind::InvalidDeal,
            format!(
                "expected hands of {HAND_SIZE} and skat of {SKAT_SIZE}, got {sizes:?} / {}",
                dealt.skat.len()
            ),
        ));
    }
    let mut seen = HashSet::with_capacity(DECK_SIZE);
    for slot in dealt.hands.iter().flatten().chain(dealt.skat.iter()) {
        if let CardSlot::Known(card) = slot {
            if !seen.insert(*card) {
                return Err(DomainError::validation(
                    ValidationKind::InvalidDeal,
                    format!("{card} dealt twice"),
                ));
            }
        }
    }
    Ok(())
}
