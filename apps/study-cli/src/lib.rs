//! Terminal front end for spaced repetition study.
//!
//! Wires the review-core session driver to a SQLite review store, a JSON
//! card catalog and stdin/stdout.

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod db;

use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Commands::Study(args) => {
            let config = config.with_overrides(cli.db, args.matching, args.fuzzy_threshold)?;
            commands::study::run(&config, &args)
        }
        Commands::Stats { deck, json } => {
            let config = config.with_overrides(cli.db, None, None)?;
            commands::stats::stats(&config, &deck, json)
        }
        Commands::Due { deck, json } => {
            let config = config.with_overrides(cli.db, None, None)?;
            commands::stats::due(&config, &deck, json)
        }
    }
}
