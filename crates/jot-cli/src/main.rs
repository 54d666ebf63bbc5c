//! JOT CLI
//!
//! Command-line interface for JOT - local notes kept in a JSON file.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use jot_core::{Config, StorageError, Store};

mod commands;
mod editor;
mod logging;
mod menu;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "jot")]
#[command(about = "JOT - Local notes in a JSON file")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive menu
    Menu,
    /// List all notes
    #[command(alias = "ls")]
    List,
    /// Add a new note
    #[command(alias = "create")]
    Add {
        /// Note title
        title: String,
        /// Note body (opens editor if not provided)
        #[arg(short, long)]
        body: Option<String>,
    },
    /// Show a note
    Show {
        /// Note ID (full ID or prefix)
        id: String,
    },
    /// Edit a note
    Edit {
        /// Note ID (full ID or prefix)
        id: String,
        /// New title
        #[arg(short = 'T', long)]
        title: Option<String>,
        /// New body
        #[arg(short, long)]
        body: Option<String>,
    },
    /// Delete a note
    #[command(alias = "rm")]
    Delete {
        /// Note ID (full ID or prefix)
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// List notes created on a date (any prefix of YYYY-MM-DDTHH:MM:SS)
    Filter {
        /// Date prefix, e.g. 2024-05-01
        date: String,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, notes_file, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if let Some(hint) = e
                .chain()
                .find_map(|cause| cause.downcast_ref::<StorageError>())
                .and_then(StorageError::recovery_suggestion)
            {
                eprintln!("Hint: {}", hint);
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));
    let config_path = cli.config.as_ref();

    // Config commands don't need the store
    if let Some(Commands::Config { command }) = &cli.command {
        return handle_config_command(command.clone(), config_path, &output);
    }

    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;
    logging::init(&config);

    let mut store = Store::open(&config)
        .with_context(|| format!("Failed to load notes from {:?}", config.notes_path()))?;
    debug!("Opened store with {} note(s)", store.len());

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => {
            if !output.is_quiet() {
                println!("Notes file: {}", store.path().display());
            }
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            menu::run(&mut store, &mut stdin.lock(), &mut stdout.lock())
        }
        Commands::List => commands::note::list(&store, &output),
        Commands::Add { title, body } => commands::note::add(&mut store, title, body, &output),
        Commands::Show { id } => commands::note::show(&store, id, &output),
        Commands::Edit { id, title, body } => {
            commands::note::edit(&mut store, id, title, body, &output)
        }
        Commands::Delete { id, yes } => commands::note::delete(&mut store, id, yes, &output),
        Commands::Filter { date } => commands::note::filter(&store, date, &output),
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_add() {
        let cli = Cli::try_parse_from(["jot", "add", "Groceries", "--body", "Milk, eggs"]).unwrap();
        match cli.command {
            Some(Commands::Add { title, body }) => {
                assert_eq!(title, "Groceries");
                assert_eq!(body.as_deref(), Some("Milk, eggs"));
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_cli_parses_global_flags_and_aliases() {
        let cli = Cli::try_parse_from(["jot", "rm", "abc", "--yes", "--json"]).unwrap();
        assert!(cli.json);
        assert!(matches!(
            cli.command,
            Some(Commands::Delete { ref id, yes: true }) if id == "abc"
        ));
    }

    #[test]
    fn test_cli_defaults_to_menu() {
        let cli = Cli::try_parse_from(["jot"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_verify() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
