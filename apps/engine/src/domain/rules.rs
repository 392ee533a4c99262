use super::cards_types::GameType;

pub const PLAYERS: usize = 3;
pub const HAND_SIZE: usize = 10;
pub const SKAT_SIZE: usize = 2;
pub const DECK_SIZE: usize = 32;
pub const TRICKS_PER_GAME: usize = 10;
pub const TOTAL_CARD_POINTS: u8 = 120;
pub const WIN_THRESHOLD: u8 = 61;
pub const SCHNEIDER_THRESHOLD: u8 = 90;
/// Declarer points at or below this mean the declarer is schneider.
pub const SCHNEIDER_LOSS_THRESHOLD: u8 = 30;
/// Score for a Ramsch Durchmarsch.
pub const DURCHMARSCH_VALUE: i32 = 120;

/// All legal bids, strictly increasing.
pub const BID_LADDER: [u16; 60] = [
    18, 20, 22, 23, 24, 27, 30, 33, 35, 36, 40, 44, 45, 46, 48, 50, 54, 55, 59, 60, 63, 66, 70, 72,
    77, 80, 81, 84, 88, 90, 96, 99, 100, 108, 110, 117, 120, 121, 126, 130, 132, 135, 140, 143,
    144, 150, 153, 154, 156, 160, 162, 168, 176, 180, 189, 192, 198, 204, 216, 240,
];

/// Base value of a game type. Null depends on hand/ouvert; Ramsch and PassedIn have none.
pub fn base_value(game_type: GameType, hand: bool, ouvert: bool) -> u16 {
    match game_type {
        GameType::Clubs => 12,
        GameType::Spades => 11,
        GameType::Hearts => 10,
        GameType::Diamonds => 9,
        GameType::Grand => 24,
        GameType::Null => match (hand, ouvert) {
            (false, false) => 23,
            (true, false) => 35,
            (false, true) => 46,
            (true, true) => 59,
        },
        GameType::Ramsch | GameType::PassedIn => 0,
    }
}
