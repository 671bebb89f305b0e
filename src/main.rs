//! `kanban` command-line front end
//!
//! Opens the store, runs one access-API operation, prints the result as JSON
//! and closes the store again.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;

use kanban_board::commands;
use kanban_board::config::{self, Config, ConfigError};
use kanban_board::domain::DomainError;
use kanban_board::AppState;

#[derive(Debug, Parser)]
#[command(name = "kanban", version, about = "Boards, lists and cards in a local SQLite store")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Database file, overriding `store.path` from the configuration
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Manage boards
    #[command(subcommand)]
    Boards(BoardCommand),
    /// Manage the lists of a board
    #[command(subcommand)]
    Lists(ListCommand),
    /// Manage the cards of a list
    #[command(subcommand)]
    Cards(CardCommand),
}

#[derive(Debug, Subcommand)]
enum BoardCommand {
    List,
    /// Show a board with its lists and cards
    Show { id: String },
    Create { name: String },
    Rename { id: String, name: String },
    /// Delete a board, its lists and their cards
    Delete { id: String },
}

#[derive(Debug, Subcommand)]
enum ListCommand {
    List { board_id: String },
    Create { board_id: String, name: String },
    Rename { id: String, name: String },
    /// Delete a list and its cards
    Delete { id: String },
}

#[derive(Debug, Subcommand)]
enum CardCommand {
    List { list_id: String },
    Create { list_id: String, name: String, description: String },
    Update { id: String, name: String, description: String },
    Delete { id: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let cfg = match settings(&cli) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_logging(&cfg);

    let state = match AppState::open(cfg.store.clone()).await {
        Ok(state) => state,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = run(&state, cli.command).await;
    if let Err(e) = state.close().await {
        log::warn!("failed to close database: {}", e);
    }

    match result {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Configuration from `--config`, with `--db` applied on top
fn settings(cli: &Cli) -> Result<Config, ConfigError> {
    let mut cfg = config::load_or_default(cli.config.as_deref())?;
    if let Some(db) = &cli.db {
        cfg.store.path = db.clone();
    }
    Ok(cfg)
}

fn init_logging(cfg: &Config) {
    let level = cfg.log.level.parse().unwrap_or(rolling_logger::Level::INFO);
    let logger = rolling_logger::LoggerConfig {
        level,
        max_file_bytes: cfg.log.max_file_bytes,
        max_files: cfg.log.max_files,
        buffer_lines: cfg.log.buffer_lines,
        ..rolling_logger::LoggerConfig::new(&cfg.log.dir, cfg.log.app_name.as_str())
    };
    if let Err(e) = rolling_logger::init_with(logger) {
        eprintln!("warning: logging disabled: {}", e);
    }
}

async fn run(state: &AppState, command: Command) -> Result<String, DomainError> {
    match command {
        Command::Boards(cmd) => match cmd {
            BoardCommand::List => render(&commands::list_boards(state).await?),
            BoardCommand::Show { id } => render(&commands::load_board(state, &id).await?),
            BoardCommand::Create { name } => render(&commands::create_board(state, &name).await?),
            BoardCommand::Rename { id, name } => {
                commands::update_board(state, &id, &name).await?;
                render(&commands::get_board(state, &id).await?)
            }
            BoardCommand::Delete { id } => render(&commands::delete_board(state, &id).await?),
        },
        Command::Lists(cmd) => match cmd {
            ListCommand::List { board_id } => render(&commands::list_lists(state, &board_id).await?),
            ListCommand::Create { board_id, name } => {
                render(&commands::create_list(state, &board_id, &name).await?)
            }
            ListCommand::Rename { id, name } => render(&commands::update_list(state, &id, &name).await?),
            ListCommand::Delete { id } => render(&commands::delete_list(state, &id).await?),
        },
        Command::Cards(cmd) => match cmd {
            CardCommand::List { list_id } => render(&commands::list_cards(state, &list_id).await?),
            CardCommand::Create {
                list_id,
                name,
                description,
            } => render(&commands::create_card(state, &list_id, &name, &description).await?),
            CardCommand::Update {
                id,
                name,
                description,
            } => render(&commands::update_card(state, &id, &name, &description).await?),
            CardCommand::Delete { id } => render(&commands::delete_card(state, &id).await?),
        },
    }
}

fn render<T: Serialize>(value: &T) -> Result<String, DomainError> {
    serde_json::to_string_pretty(value).map_err(|e| DomainError::Internal(e.to_string()))
}
