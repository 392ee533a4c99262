//! Mirror of a game played on a remote ISS table.
//!
//! Moves reported by the server are checked against the local `GameState`.
//! When the server reports something the local rules reject, the mismatch is
//! logged and the move is recorded anyway through `replay_move`; the server is
//! authoritative.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::rules::RulesConfig;
use crate::domain::game_flow::{apply_move, replay_move, start_dealing};
use crate::domain::moves::MoveInformation;
use crate::domain::rules::PLAYERS;
use crate::domain::state::{GameResult, GameState};
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::protocol::iss::summary::GameSummary;
use crate::protocol::iss::table::{parse_table_line, TableEvent, TableMessage, TableStatus};

#[derive(Debug, Clone)]
pub struct CompletedGame {
    pub game_no: Option<u32>,
    /// What the local state computed, if a game was being tracked.
    pub local_result: Option<GameResult>,
    /// The server's summary; its result is the one that counts.
    pub summary: GameSummary,
    /// Local and reported outcome agree on winner and value.
    pub agreed: bool,
}

impl CompletedGame {
    pub fn result(&self) -> Option<&GameResult> {
        self.summary.result()
    }
}

pub struct RemoteTable {
    table: String,
    login: String,
    rules: RulesConfig,
    status: Option<TableStatus>,
    game: Option<GameState>,
    game_no: Option<u32>,
    player_times: [f64; PLAYERS],
    mismatches: usize,
    completed: Vec<CompletedGame>,
}

impl RemoteTable {
    pub fn new(table: impl Into<String>, login: impl Into<String>, rules: RulesConfig) -> Self {
        Self {
            table: table.into(),
            login: login.into(),
            rules,
            status: None,
            game: None,
            game_no: None,
            player_times: [0.0; PLAYERS],
            mismatches: 0,
            completed: Vec::new(),
        }
    }

    pub fn state(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    pub fn status(&self) -> Option<&TableStatus> {
        self.status.as_ref()
    }

    pub fn completed(&self) -> &[CompletedGame] {
        &self.completed
    }

    /// Server moves the local rules rejected since this table was created.
    pub fn mismatches(&self) -> usize {
        self.mismatches
    }

    pub fn player_times(&self) -> [f64; PLAYERS] {
        self.player_times
    }

    pub fn handle(&mut self, msg: TableMessage) -> Result<(), AppError> {
        if msg.table != self.table {
            debug!(table = %msg.table, "message for another table");
            return Ok(());
        }
        match msg.event {
            TableEvent::State(status) => {
                debug!(players = status.players.len(), "table state");
                self.status = Some(status);
            }
            TableEvent::Start(start) => {
                info!(table = %self.table, game_no = start.game_no, "game started");
                let mut state = GameState::with_players(self.rules.clone(), start.player_names);
                start_dealing(&mut state)?;
                self.game = Some(state);
                self.game_no = Some(start.game_no);
                self.player_times = start.player_times;
            }
            TableEvent::Play { mv, player_times } => {
                self.player_times = player_times;
                self.track(&mv)?;
            }
            TableEvent::End(summary) => self.finish(*summary),
            TableEvent::Tell { sender, text } => {
                info!(table = %self.table, %sender, %text, "table chat");
            }
        }
        Ok(())
    }

    pub fn handle_line(&mut self, line: &str) -> Result<(), AppError> {
        let msg = parse_table_line(line)?;
        self.handle(msg)
    }

    /// Feed every `table` line from `reader` until it ends or `cancel` fires.
    ///
    /// Lines that fail to decode or apply are logged and skipped.
    pub async fn drive<R>(&mut self, reader: R, cancel: CancellationToken) -> Result<(), AppError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = reader.lines();
        loop {
            let line = tokio::select! {
                _ = cancel.cancelled() => return Err(AppError::Cancelled),
                line = lines.next_line() => line?,
            };
            let Some(line) = line else {
                debug!(login = %self.login, "table stream closed");
                return Ok(());
            };
            if !line.starts_with("table ") {
                continue;
            }
            if let Err(e) = self.handle_line(&line) {
                warn!(error = %e, code = e.code(), line = %line, "skipping table line");
            }
        }
    }

    fn track(&mut self, mv: &MoveInformation) -> Result<(), AppError> {
        if self.game.is_none() {
            warn!(table = %self.table, "move before game start, tracking anyway");
            let mut state = GameState::new(self.rules.clone());
            start_dealing(&mut state)?;
            self.game = Some(state);
        }
        let Some(state) = self.game.as_mut() else {
            return Ok(());
        };
        match apply_move(state, mv) {
            Ok(transitions) => debug!(kind = mv.kind.tag(), ?transitions, "server move applied"),
            Err(e) => {
                let mismatch = DomainError::protocol_mismatch(format!(
                    "server move {} by {:?} rejected locally: {e}",
                    mv.kind.tag(),
                    mv.player
                ));
                warn!(table = %self.table, error = %mismatch, "resynchronising from server");
                self.mismatches += 1;
                replay_move(state, mv);
            }
        }
        Ok(())
    }

    fn finish(&mut self, summary: GameSummary) {
        let local_result = self.game.take().and_then(|g| g.data.result);
        let agreed = match (&local_result, summary.result()) {
            (Some(local), Some(reported)) => {
                local.won == reported.won && local.game_value == reported.game_value
            }
            (None, None) => true,
            _ => false,
        };
        if !agreed {
            warn!(
                table = %self.table,
                local = ?local_result.as_ref().map(|r| r.game_value),
                reported = ?summary.result().map(|r| r.game_value),
                "local result differs from server summary"
            );
        }
        info!(table = %self.table, game_no = ?self.game_no, agreed, "game ended");
        self.completed.push(CompletedGame {
            game_no: self.game_no.take(),
            local_result,
            summary,
            agreed,
        });
    }
}
