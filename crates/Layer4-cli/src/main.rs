//! dirsize CLI - Main entry point

mod cli;
mod report;

use clap::{CommandFactory, Parser};
use dirsize_core::SizeCacheConfig;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// dirsize - total regular-file size of a directory, cached by modification time
#[derive(Parser, Debug)]
#[command(name = "dirsize")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory to measure
    directory: Option<PathBuf>,

    /// Seconds to wait between the first and second call
    #[arg(default_value_t = 0)]
    sleep_seconds: u64,

    /// Skip unreadable entries instead of failing the walk
    #[arg(long)]
    skip_unreadable: bool,

    /// Print both measurements as one JSON document
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let Some(directory) = args.directory else {
        eprintln!("{}", Args::command().render_usage());
        std::process::exit(1);
    };

    // Initialize logging
    let log_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = if args.skip_unreadable {
        SizeCacheConfig::lenient()
    } else {
        SizeCacheConfig::strict()
    };

    cli::run(&cli::RunOptions {
        directory,
        sleep: Duration::from_secs(args.sleep_seconds),
        config,
        json: args.json,
    })
}
