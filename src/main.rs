// src/main.rs

mod cli;
mod commands;
mod config;
mod db;
mod error;
mod models;
mod mood;
mod search;
mod streak;

use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use db::SqliteStore;
use error::Result;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("MOODLOG_LOG", "warn")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.db)?;
    log::debug!("using database {}", config.db_path.display());

    match cli.command {
        Commands::Init => commands::handle_init(&config),
        Commands::Mood { score } => commands::handle_mood(score),
        Commands::Write { entry } => commands::handle_write(&open_store(&config)?, &config, entry),
        Commands::Edit { id, entry } => {
            commands::handle_edit(&open_store(&config)?, &config, id, entry)
        }
        Commands::Show { date } => commands::handle_show(&open_store(&config)?, date),
        Commands::List => commands::handle_list(&open_store(&config)?),
        Commands::Search { query } => commands::handle_search(&open_store(&config)?, &query),
        Commands::Del { ids, yes } => commands::handle_del(&open_store(&config)?, &ids, yes),
        Commands::Streak => commands::handle_streak(&open_store(&config)?),
    }
}

fn open_store(config: &Config) -> Result<SqliteStore> {
    SqliteStore::open(&config.db_path)
}
