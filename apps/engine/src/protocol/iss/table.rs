//! Table lines: `table <name> <login> <command> <params...>`.

use tracing::debug;

use crate::domain::moves::MoveInformation;
use crate::domain::rules::PLAYERS;
use crate::domain::state::Player;
use crate::errors::decode::{DecodeError, DecodeErrorKind};
use crate::protocol::iss::moves::parse_move;
use crate::protocol::iss::summary::{parse_game_summary, GameSummary};

/// A player sitting at a table, as listed in a `state` line.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerStatus {
    pub name: String,
    pub ip: String,
    pub games_played: u32,
    pub games_won: u32,
    pub last_game_result: i32,
    pub total_points: i32,
    pub switch34: bool,
    pub talk_enabled: bool,
    pub ready_to_play: bool,
    pub left: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableStatus {
    pub max_players: usize,
    pub players: Vec<PlayerStatus>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameStart {
    pub game_no: u32,
    pub player_names: [String; PLAYERS],
    /// Remaining thinking time per seat, in seconds.
    pub player_times: [f64; PLAYERS],
}

#[derive(Debug, Clone)]
pub enum TableEvent {
    State(TableStatus),
    Start(GameStart),
    Play {
        mv: MoveInformation,
        player_times: [f64; PLAYERS],
    },
    End(Box<GameSummary>),
    Tell {
        sender: String,
        text: String,
    },
}

#[derive(Debug, Clone)]
pub struct TableMessage {
    pub table: String,
    pub login: String,
    pub event: TableEvent,
}

fn field<'a>(line: &str, params: &[&'a str], i: usize, what: &str) -> Result<&'a str, DecodeError> {
    params
        .get(i)
        .copied()
        .ok_or_else(|| DecodeError::missing(line, what))
}

fn num<T: std::str::FromStr>(token: &str) -> Result<T, DecodeError> {
    token.parse().map_err(|_| DecodeError::bad_number(token))
}

/// Parse one `table ...` line from the server.
pub fn parse_table_line(line: &str) -> Result<TableMessage, DecodeError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [keyword, table, login, command, params @ ..] = tokens.as_slice() else {
        return Err(DecodeError::missing(line, "table header"));
    };
    if *keyword != "table" {
        return Err(DecodeError::unrecognized(line));
    }

    let event = match *command {
        "state" => TableEvent::State(table_status(line, params)?),
        "start" => TableEvent::Start(game_start(line, params)?),
        "play" => {
            let mover = field(line, params, 0, "mover")?;
            let token = field(line, params, 1, "move")?;
            let mv = parse_move(mover, token)?;
            if params.len() < 5 {
                return Err(DecodeError::missing(line, "player times"));
            }
            let times = &params[params.len() - PLAYERS..];
            TableEvent::Play {
                mv,
                player_times: [num(times[0])?, num(times[1])?, num(times[2])?],
            }
        }
        "end" => TableEvent::End(Box::new(parse_game_summary(&params.join(" "))?)),
        "tell" => {
            let sender = field(line, params, 0, "sender")?;
            TableEvent::Tell {
                sender: sender.to_string(),
                text: params[1..].join(" "),
            }
        }
        other => {
            return Err(DecodeError::new(
                DecodeErrorKind::UnknownCommand,
                line,
                format!("unknown table command {other}"),
            ))
        }
    };
    debug!(table, command, "table line");
    Ok(TableMessage {
        table: table.to_string(),
        login: login.to_string(),
        event,
    })
}

/// `<max> <seat markers...> <unused> <player block>*`, ten fields per block.
fn table_status(line: &str, params: &[&str]) -> Result<TableStatus, DecodeError> {
    let max_players: usize = num(field(line, params, 0, "max players")?)?;
    let mut players = Vec::new();
    for i in 0..max_players {
        let base = i * 10 + 5;
        let name = field(line, params, base, "player name")?;
        if name == "." {
            continue;
        }
        let f = |offset: usize, what: &str| field(line, params, base + offset, what);
        players.push(PlayerStatus {
            name: name.to_string(),
            ip: f(1, "ip")?.to_string(),
            games_played: num(f(2, "games played")?)?,
            games_won: num(f(3, "games won")?)?,
            last_game_result: num(f(4, "last result")?)?,
            total_points: num(f(5, "total points")?)?,
            switch34: f(6, "switch34")? == "1",
            talk_enabled: f(8, "talk")? == "1",
            ready_to_play: f(9, "ready")? == "1",
            left: params.get(i + 1) == Some(&"."),
        });
    }
    Ok(TableStatus {
        max_players,
        players,
    })
}

fn game_start(line: &str, params: &[&str]) -> Result<GameStart, DecodeError> {
    let f = |i: usize, what: &str| field(line, params, i, what);
    let mut player_names: [String; PLAYERS] = Default::default();
    let mut player_times = [0.0; PLAYERS];
    for p in Player::ALL {
        let i = p.index();
        player_names[i] = f(1 + 2 * i, "player name")?.to_string();
        player_times[i] = num(f(2 + 2 * i, "player time")?)?;
    }
    Ok(GameStart {
        game_no: num(f(0, "game number")?)?,
        player_names,
        player_times,
    })
}
