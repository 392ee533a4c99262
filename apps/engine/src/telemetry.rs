use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Output shape of the process-wide subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

pub fn init_tracing(format: LogFormat) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,skat_engine=info"));

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .with_target(false)
                .with_file(false)
                .with_line_number(false)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_ansi(false)
                .json();
            registry.with(fmt_layer).try_init().ok();
        }
        LogFormat::Pretty => {
            registry.with(fmt::layer().with_target(false)).try_init().ok();
        }
    }
}
