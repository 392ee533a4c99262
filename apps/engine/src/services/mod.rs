pub mod channel;
pub mod game_runner;
pub mod player_source;
pub mod random;
pub mod remote_table;
pub mod series;
