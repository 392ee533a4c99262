//! RNG seed derivation for deterministic series.
//!
//! A series carries one base seed; every game and every random seat derive
//! their own seed from it so runs can be replayed.

/// Seed for dealing game `game_no` of a series.
pub fn derive_dealing_seed(series_seed: u64, game_no: u32) -> u64 {
    series_seed
        .wrapping_add((game_no as u64).wrapping_mul(1_000_000))
        .wrapping_add(2)
}

/// Seed for the random player in `seat_index` of a series.
pub fn derive_player_seed(series_seed: u64, seat_index: usize) -> u64 {
    series_seed
        .wrapping_add((seat_index as u64).wrapping_mul(100))
        .wrapping_add(1)
}
