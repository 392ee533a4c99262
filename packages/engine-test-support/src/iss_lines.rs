//! Builders for ISS `table` lines.

/// Thinking time used when a test does not care about the clocks.
pub const FULL_TIME: f64 = 180.0;

/// `table <table> <login> <command> <params...>`
pub fn table_line(table: &str, login: &str, command: &str, params: &[&str]) -> String {
    let mut line = format!("table {table} {login} {command}");
    for p in params {
        line.push(' ');
        line.push_str(p);
    }
    line
}

/// A `start` line for game `game_no` with everybody on full time.
pub fn start_line(table: &str, login: &str, game_no: u32, names: [&str; 3]) -> String {
    let time = format!("{FULL_TIME:.1}");
    let game_no = game_no.to_string();
    table_line(
        table,
        login,
        "start",
        &[&game_no, names[0], &time, names[1], &time, names[2], &time],
    )
}

/// A `play` line for `move_token` by `mover` (`w`, `0`, `1` or `2`).
pub fn play_line(table: &str, login: &str, mover: &str, move_token: &str) -> String {
    let time = format!("{FULL_TIME:.1}");
    table_line(table, login, "play", &[mover, move_token, &time, &time, &time])
}

/// An `end` line carrying a game summary.
pub fn end_line(table: &str, login: &str, summary: &str) -> String {
    table_line(table, login, "end", &[summary])
}
