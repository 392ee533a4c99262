#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod protocol;
pub mod services;
pub mod telemetry;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use config::rules::{RamschSkatOwner, RulesConfig};
pub use error::AppError;
pub use errors::{DecodeError, DomainError, ValidationKind};
pub use protocol::iss::{parse_game_summary, parse_move, parse_table_line, GameSummary, TableEvent};
pub use services::game_runner::{GameOutcome, GameRunner};
pub use services::player_source::{MoveRequest, PlayerSource, PlayerView};
pub use services::remote_table::RemoteTable;
pub use services::series::{run_tables, Series, SeriesReport};
pub use telemetry::{init_tracing, LogFormat};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
