//! Logging for integration test binaries, installed from a `ctor` hook in
//! `tests/common`.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Install the test subscriber once per binary.
///
/// Level: `TEST_LOG`, then `RUST_LOG`, then `"warn"`. Set `TEST_LOG_JSON=1`
/// to get one JSON object per event, handy when grepping runner logs for a
/// seat or a table.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let level = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "warn".to_string());
        let json = std::env::var("TEST_LOG_JSON").is_ok_and(|v| v == "1");

        let builder = fmt()
            .with_env_filter(EnvFilter::new(level))
            .with_test_writer()
            .without_time();
        if json {
            builder.json().try_init().ok();
        } else {
            builder.with_target(false).try_init().ok();
        }
    });
}
