// 魔王将棋のローカル対局サーバ（標準入出力の JSON Lines）

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use maou_shogi_server::{RoomTable, ServerConfig, local};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum number of rooms (overrides the config file)
    #[arg(long)]
    max_rooms: Option<usize>,

    /// Let the maou pass through its own pieces in newly created rooms
    #[arg(long)]
    friendly_pierce: bool,

    /// Seed for generated player names
    #[arg(long)]
    seed: Option<u64>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("invalid log level: {level}"))?;

    // stdout はプロトコル専用なのでログは stderr へ
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install tracing subscriber")?;
    tracing_log::LogTracer::init().context("failed to install log bridge")?;
    Ok(())
}

fn build_config(args: &Args) -> Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(max_rooms) = args.max_rooms {
        config.max_rooms = max_rooms;
    }
    if args.friendly_pierce {
        config.default_friendly_pierce = true;
    }
    if args.seed.is_some() {
        config.rng_seed = args.seed;
    }
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level)?;

    let config = build_config(&args)?;
    tracing::info!(?config, "starting maou shogi local server");

    let mut table = RoomTable::new(config);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let result = local::run(&mut table, stdin.lock(), stdout.lock());
    if let Err(e) = &result {
        tracing::error!("fatal error: {e:#}");
    }
    io::stdout().flush().ok();
    result
}
