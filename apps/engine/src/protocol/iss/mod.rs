//! Decoder and encoder for the ISS text protocol.
//!
//! Every decoded move is the same `MoveInformation` the local engine consumes.

pub mod announcement;
pub mod moves;
pub mod summary;
pub mod table;

pub use announcement::{decode_announcement, encode_announcement, DecodedAnnouncement};
pub use moves::{encode_deal_for, encode_mover, encode_move, parse_deal, parse_move};
pub use summary::{parse_game_summary, GameSummary, ReportedResult};
pub use table::{parse_table_line, GameStart, TableEvent, TableMessage, TableStatus};
