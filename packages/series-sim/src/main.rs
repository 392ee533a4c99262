//! Series simulator CLI: in-memory Skat series between random players, and a
//! decoder for ISS game summaries.

mod output;
mod simulator;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Args, Parser, Subcommand, ValueEnum};
use output::OutputWriter;
use simulator::{decode_file, simulate, SimulationPlan};
use skat_engine::{init_tracing, LogFormat, RamschSkatOwner, RulesConfig};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "series-sim")]
#[command(about = "In-memory Skat series simulator and ISS summary decoder")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Structured JSON logs filtered by RUST_LOG
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run series of games between random players
    Simulate(SimulateArgs),
    /// Decode a file of game summaries (one per line) into JSON lines
    Decode(DecodeArgs),
}

#[derive(Args)]
struct SimulateArgs {
    /// Games per table
    #[arg(short, long, default_value = "36")]
    games: u32,

    /// Independent tables run in parallel
    #[arg(short, long, default_value = "1")]
    tables: u32,

    /// Base seed; a random one is drawn when missing
    #[arg(long)]
    seed: Option<u64>,

    /// Comma-separated participant names
    #[arg(long, value_delimiter = ',', default_value = "alice,bob,carol")]
    names: Vec<String>,

    /// Play Ramsch when everybody passes
    #[arg(long)]
    ramsch: bool,

    /// In Ramsch, the skat is out of play instead of going to the last trick
    #[arg(long, requires = "ramsch")]
    discard_ramsch_skat: bool,

    /// Highest bid the random players make
    #[arg(long, default_value = "48")]
    bid_limit: u16,

    /// Show output summary and file paths
    #[arg(long)]
    show_output: bool,

    /// Output directory for results
    #[arg(long, default_value = "./series-results")]
    output_dir: String,

    /// Output format
    #[arg(long, default_value = "jsonl")]
    output_format: OutputFormat,

    /// Compress JSONL output
    #[arg(long)]
    compress: bool,
}

#[derive(Args)]
struct DecodeArgs {
    /// File with one summary or `table ... end` line per game
    file: PathBuf,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Jsonl,
    Csv,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Silent by default, only warnings and errors
    let show_output = matches!(&cli.command, Command::Simulate(a) if a.show_output);
    let filter = if cli.verbose {
        "debug"
    } else if show_output {
        "info"
    } else {
        "warn"
    };
    if cli.json_logs {
        init_tracing(LogFormat::Json);
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    match cli.command {
        Command::Simulate(args) => run_simulate(args).await,
        Command::Decode(args) => run_decode(args),
    }
}

async fn run_simulate(args: SimulateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let [a, b, c] = <[String; 3]>::try_from(args.names)
        .map_err(|names| format!("expected three names, got {}", names.len()))?;

    let mut rules = RulesConfig::from_env()?;
    if args.ramsch {
        rules.play_ramsch = true;
    }
    if args.discard_ramsch_skat {
        rules.ramsch_skat_owner = RamschSkatOwner::Discarded;
    }

    let plan = SimulationPlan {
        rules,
        names: [a, b, c],
        base_seed: args.seed.unwrap_or_else(rand::random),
        games: args.games,
        tables: args.tables,
        bid_limit: args.bid_limit,
    };
    info!(seed = plan.base_seed, tables = plan.tables, games = plan.games, "starting simulation");

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, stopping tables");
            on_interrupt.cancel();
        }
    });

    let mut output_writer =
        OutputWriter::new(&args.output_dir, args.output_format, args.compress)?;
    let start = Instant::now();
    let reports = simulate(&plan, cancel).await;

    let mut failed = 0;
    for (table, report) in reports.iter().enumerate() {
        match report {
            Ok(report) => {
                output_writer.write_report(table, report)?;
                if args.show_output {
                    info!(table, scores = ?report.scores, "table finished");
                }
            }
            Err(e) => {
                failed += 1;
                warn!(table, error = %e, code = e.code(), "table failed");
            }
        }
    }

    if args.show_output {
        let (jsonl, csv) = output_writer.output_paths();
        info!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            failed,
            ?jsonl,
            ?csv,
            "simulation finished"
        );
    }
    output_writer.finish()?;
    Ok(())
}

fn run_decode(args: DecodeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(&args.file)?;
    for game in decode_file(&text) {
        println!("{}", serde_json::to_string(&game)?);
    }
    Ok(())
}
