//! Game summaries: `TAG[payload]` blocks as sent at the end of a game.
//!
//! Moves from the `MV` block are replayed through the same accumulation path
//! live games use, so the rebuilt `GameData` scores the same way. Values the
//! server reports in the `R` block take precedence over the recomputed ones.

use lazy_regex::regex;
use tracing::{debug, warn};

use crate::config::rules::RulesConfig;
use crate::domain::game_flow::replay_move;
use crate::domain::moves::MoveInformation;
use crate::domain::rules::TOTAL_CARD_POINTS;
use crate::domain::scoring::compute_result;
use crate::domain::state::{GameData, GameResult, GameState, Player};
use crate::errors::decode::DecodeError;
use crate::protocol::iss::moves::{parse_move, parse_seat};

/// Result fields as reported by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportedResult {
    pub declarer: Option<Player>,
    pub won: Option<bool>,
    pub game_value: Option<i32>,
    pub declarer_points: Option<u8>,
    pub declarer_tricks: Option<u8>,
    pub matadors: Option<u8>,
    pub overbid: Option<bool>,
    pub schneider: bool,
    pub schwarz: bool,
    pub penalty: bool,
}

impl ReportedResult {
    fn apply(&self, result: &mut GameResult) {
        if let Some(won) = self.won {
            result.won = won;
        }
        if let Some(value) = self.game_value {
            result.game_value = value;
        }
        if let Some(points) = self.declarer_points {
            result.declarer_points = points;
            result.opponent_points = TOTAL_CARD_POINTS.saturating_sub(points);
        }
        if let Some(tricks) = self.declarer_tricks {
            result.declarer_tricks = tricks;
        }
        if let Some(matadors) = self.matadors {
            result.matadors = matadors;
        }
        if let Some(overbid) = self.overbid {
            result.overbid = overbid;
        }
        result.schneider |= self.schneider;
        result.schwarz |= self.schwarz;
    }
}

#[derive(Debug, Clone)]
pub struct GameSummary {
    /// Game data rebuilt from the move list, with the reported result applied.
    pub data: GameData,
    pub moves: Vec<MoveInformation>,
    pub reported: ReportedResult,
    /// Result tokens that were not understood.
    pub unknown_tokens: Vec<String>,
}

impl GameSummary {
    pub fn result(&self) -> Option<&GameResult> {
        self.data.result.as_ref()
    }
}

/// Parse a full game summary.
///
/// A move pair that cannot be decoded is logged and skipped; the rest of the
/// summary is still used.
pub fn parse_game_summary(text: &str) -> Result<GameSummary, DecodeError> {
    let mut state = GameState::new(RulesConfig::default());
    let mut moves = Vec::new();
    let mut reported = ReportedResult::default();
    let mut unknown_tokens = Vec::new();

    for caps in regex!(r"(\w+)\[(.*?)\]").captures_iter(text) {
        let (tag, payload) = (&caps[1], &caps[2]);
        match tag {
            "P0" | "P1" | "P2" => {
                let seat = parse_seat(&tag[1..])?;
                state.data.player_names[seat.index()] = payload.to_string();
            }
            "MV" => {
                let tokens: Vec<&str> = payload.split_whitespace().collect();
                if tokens.len() % 2 != 0 {
                    return Err(DecodeError::missing(payload, "move token"));
                }
                for pair in tokens.chunks(2) {
                    match parse_move(pair[0], pair[1]) {
                        Ok(mv) => {
                            replay_move(&mut state, &mv);
                            moves.push(mv);
                        }
                        Err(e) => warn!(error = %e, "skipping undecodable summary move"),
                    }
                }
            }
            "R" => {
                for token in payload.split_whitespace() {
                    if !parse_result_token(&mut reported, token) {
                        debug!(token, "ignoring result token");
                        unknown_tokens.push(token.to_string());
                    }
                }
            }
            other => debug!(tag = other, "ignoring summary block"),
        }
    }

    let mut data = state.data;
    if let Some(declarer) = reported.declarer {
        data.declarer = Some(declarer);
    }
    let mut result = match data.result.take() {
        Some(r) => r,
        None => compute_result(&data, &RulesConfig::default()).unwrap_or_default(),
    };
    reported.apply(&mut result);
    data.result = Some(result);

    Ok(GameSummary {
        data,
        moves,
        reported,
        unknown_tokens,
    })
}

/// Returns `false` for tokens this decoder does not know or cannot read.
fn parse_result_token(r: &mut ReportedResult, token: &str) -> bool {
    let Some((key, value)) = token.split_once(':') else {
        match token {
            "win" => r.won = Some(true),
            "loss" => r.won = Some(false),
            "overbid" => r.overbid = Some(true),
            "bidok" => r.overbid = Some(false),
            "penalty" => r.penalty = true,
            _ => return false,
        }
        return true;
    };
    match key {
        "d" => {
            let Ok(seat) = parse_seat(value) else {
                return false;
            };
            r.declarer = Some(seat);
        }
        "v" => {
            let Ok(v) = value.parse() else { return false };
            r.game_value = Some(v);
        }
        "p" => {
            let Ok(p) = value.parse() else { return false };
            r.declarer_points = Some(p);
        }
        "t" => {
            let Ok(t) = value.parse() else { return false };
            r.declarer_tricks = Some(t);
        }
        "m" => {
            let Ok(m) = value.parse::<i16>() else {
                return false;
            };
            r.matadors = Some(m.unsigned_abs() as u8);
        }
        "s" => r.schneider = value == "1",
        "z" => r.schwarz = value == "1",
        _ => return false,
    }
    true
}
