use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::AppError;

/// Who collects the skat points in Ramsch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RamschSkatOwner {
    /// The winner of the last trick.
    LastTrick,
    /// Nobody; the skat is out of play.
    Discarded,
}

impl FromStr for RamschSkatOwner {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "last_trick" | "lasttrick" => Ok(RamschSkatOwner::LastTrick),
            "discarded" | "none" => Ok(RamschSkatOwner::Discarded),
            other => Err(AppError::config(format!(
                "SKAT_RAMSCH_SKAT_OWNER must be 'last_trick' or 'discarded', got '{other}'"
            ))),
        }
    }
}

/// Rule options passed explicitly to the state machine and services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RulesConfig {
    /// Play Ramsch when everybody passes; otherwise the game is passed in.
    pub play_ramsch: bool,
    pub ramsch_skat_owner: RamschSkatOwner,
    /// Upper bound for a single player decision.
    pub move_timeout: Duration,
    /// Rejected moves tolerated per request before the player is timed out.
    pub max_move_attempts: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            play_ramsch: false,
            ramsch_skat_owner: RamschSkatOwner::LastTrick,
            move_timeout: Duration::from_secs(30),
            max_move_attempts: 3,
        }
    }
}

impl RulesConfig {
    /// Build from `SKAT_*` environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();
        let play_ramsch = match opt_var("SKAT_PLAY_RAMSCH") {
            Some(v) => parse_bool("SKAT_PLAY_RAMSCH", &v)?,
            None => defaults.play_ramsch,
        };
        let ramsch_skat_owner = match opt_var("SKAT_RAMSCH_SKAT_OWNER") {
            Some(v) => v.parse()?,
            None => defaults.ramsch_skat_owner,
        };
        let move_timeout = match opt_var("SKAT_MOVE_TIMEOUT_MS") {
            Some(v) => Duration::from_millis(parse_num("SKAT_MOVE_TIMEOUT_MS", &v)?),
            None => defaults.move_timeout,
        };
        let max_move_attempts = match opt_var("SKAT_MAX_MOVE_ATTEMPTS") {
            Some(v) => {
                let n: u32 = parse_num("SKAT_MAX_MOVE_ATTEMPTS", &v)?;
                if n == 0 {
                    return Err(AppError::config(
                        "SKAT_MAX_MOVE_ATTEMPTS must be at least 1".to_string(),
                    ));
                }
                n
            }
            None => defaults.max_move_attempts,
        };
        Ok(Self {
            play_ramsch,
            ramsch_skat_owner,
            move_timeout,
            max_move_attempts,
        })
    }
}

/// Get optional environment variable; empty counts as unset
fn opt_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_bool(name: &str, value: &str) -> Result<bool, AppError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AppError::config(format!(
            "Environment variable '{name}' must be a boolean, got '{value}'"
        ))),
    }
}

fn parse_num<T: FromStr>(name: &str, value: &str) -> Result<T, AppError> {
    value.trim().parse().map_err(|_| {
        AppError::config(format!(
            "Environment variable '{name}' must be a number, got '{value}'"
        ))
    })
}
