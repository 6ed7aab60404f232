#![forbid(unsafe_code)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, Level as TraceLevel};
use tracing_subscriber::FmtSubscriber;

use promptboard::config::{AppConfig, ENV_MONGODB_URL};
use promptboard::database::{connect_db, redact_url};
use promptboard::gui::run_gui;

/// Compose image prompts, backed by a MongoDB store
#[derive(Parser, Debug)]
#[command(name = "promptboard", version)]
struct Args {
    /// MongoDB connection string (overrides the config file)
    #[arg(long, env = ENV_MONGODB_URL)]
    db_url: Option<String>,

    /// Path to the TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level: error, warn, info, debug or trace
    #[arg(long)]
    log_level: Option<TraceLevel>,

    /// Only run the database bootstrap, then exit
    #[arg(long)]
    headless: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let (mut config, corrections) = match &args.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    if let Some(url) = args.db_url {
        config.mongodb_url = url;
    }

    let level = args.log_level.unwrap_or_else(|| config.tracing_level());
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Config was read before the subscriber existed; report what it fixed now
    for correction in &corrections {
        correction.log();
    }

    info!(
        mongodb_url = %redact_url(&config.mongodb_url),
        log_level = %level,
        window = ?(config.window_width, config.window_height),
        "config loaded"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start tokio runtime")?;

    // Fire and forget: the runtime keeps driving the attempt while the GUI runs
    let bootstrap = {
        let _guard = runtime.enter();
        connect_db(config.mongodb_url.clone())
    };

    if args.headless {
        // The outcome is already in the log; only a panicked task is worth reporting
        if let Err(e) = runtime.block_on(bootstrap) {
            error!("database bootstrap task failed: {e}");
        }
        return Ok(());
    }

    run_gui(&config)
}
