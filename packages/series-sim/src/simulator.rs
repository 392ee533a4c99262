//! Plans and runs simulated tables; decodes summary files.

use std::sync::Arc;

use serde::Serialize;
use skat_engine::domain::{derive_player_seed, GameType};
use skat_engine::services::random::RandomPlayer;
use skat_engine::services::series::Participant;
use skat_engine::{
    parse_game_summary, parse_table_line, run_tables, AppError, GameSummary, RulesConfig, Series,
    SeriesReport, TableEvent,
};
use tokio_util::sync::CancellationToken;
use tracing::warn;

pub struct SimulationPlan {
    pub rules: RulesConfig,
    pub names: [String; 3],
    pub base_seed: u64,
    pub games: u32,
    pub tables: u32,
    pub bid_limit: u16,
}

impl SimulationPlan {
    /// Seed of one table; tables never share deals.
    pub fn table_seed(&self, table: u32) -> u64 {
        self.base_seed
            .wrapping_add(u64::from(table).wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    fn series(&self, table: u32) -> Series {
        let seed = self.table_seed(table);
        let mut seat = 0;
        let participants = self.names.clone().map(|name| {
            let player = RandomPlayer::new(name, Some(derive_player_seed(seed, seat)))
                .with_bid_limit(self.bid_limit);
            seat += 1;
            Participant::new(Arc::new(player))
        });
        Series::new(self.rules.clone(), participants, seed, self.games)
    }
}

pub async fn simulate(
    plan: &SimulationPlan,
    cancel: CancellationToken,
) -> Vec<Result<SeriesReport, AppError>> {
    let tables = (0..plan.tables).map(|t| plan.series(t)).collect();
    run_tables(tables, cancel).await
}

/// One decoded game, flattened for JSON output.
#[derive(Debug, Serialize)]
pub struct DecodedGame {
    pub line: usize,
    pub players: [String; 3],
    pub declarer: Option<String>,
    pub game_type: Option<GameType>,
    pub won: Option<bool>,
    pub game_value: Option<i32>,
    pub declarer_points: Option<u8>,
    pub moves: usize,
    pub degraded: bool,
    pub unknown_tokens: Vec<String>,
}

impl DecodedGame {
    fn from_summary(line: usize, summary: &GameSummary) -> Self {
        let result = summary.result();
        Self {
            line,
            players: summary.data.player_names.clone(),
            declarer: summary
                .data
                .declarer
                .map(|d| summary.data.player_names[d.index()].clone()),
            game_type: summary.data.game_type(),
            won: result.map(|r| r.won),
            game_value: result.map(|r| r.game_value),
            declarer_points: result.map(|r| r.declarer_points),
            moves: summary.moves.len(),
            degraded: summary.data.degraded,
            unknown_tokens: summary.unknown_tokens.clone(),
        }
    }
}

/// Decode every summary in `text`. Lines may be bare summaries or
/// `table ... end` lines; anything else is skipped.
pub fn decode_file(text: &str) -> Vec<DecodedGame> {
    let mut games = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let summary = if line.starts_with("table ") {
            match parse_table_line(line) {
                Ok(msg) => match msg.event {
                    TableEvent::End(summary) => Ok(*summary),
                    _ => continue,
                },
                Err(e) => Err(e),
            }
        } else {
            parse_game_summary(line)
        };
        match summary {
            Ok(summary) => games.push(DecodedGame::from_summary(line_no, &summary)),
            Err(e) => warn!(line = line_no, error = %e, "skipping undecodable line"),
        }
    }
    games
}
