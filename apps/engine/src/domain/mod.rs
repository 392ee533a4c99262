//! Domain layer: pure Skat rules, the game state machine and its types.

pub mod announcement;
pub mod bidding;
pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod dealing;
pub mod fixtures;
pub mod game_flow;
pub mod game_transition;
pub mod moves;
pub mod rules;
pub mod scoring;
pub mod seed_derivation;
pub mod state;
pub mod tricks;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_game_flow;
#[cfg(test)]
mod tests_props_legality;
#[cfg(test)]
mod tests_props_trick_winner;
#[cfg(test)]
mod tests_replay;
#[cfg(test)]
mod tests_scoring;

// Re-exports for ergonomics
pub use announcement::GameAnnouncement;
pub use bidding::{bid_ladder, is_valid_raise, next_valid_bid};
pub use cards_logic::{card_beats, is_allowed, is_trump, legal_cards, rank_order};
pub use cards_types::{Card, CardSlot, GameType, Rank, Suit};
pub use dealing::deal_cards;
pub use game_flow::{apply_move, replay_move, start_dealing};
pub use game_transition::GameTransition;
pub use moves::{DealtCards, MoveInformation, MoveKind, MovePlayer};
pub use scoring::compute_result;
pub use seed_derivation::{derive_dealing_seed, derive_player_seed};
pub use state::{
    resolve_trick_winner, BidAction, BidRecord, GameData, GameResult, GameState, Phase, Player,
    Trick,
};
