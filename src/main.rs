//! Promptlet - manage prompt mini-apps, model options and API credentials

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use promptlet::Theme;

mod cli;

/// Manage prompt mini-apps, model options and API credentials
#[derive(Parser)]
#[command(name = "promptlet")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current settings
    Show {
        /// Print the API key in full
        #[arg(long)]
        reveal: bool,

        /// Print the persisted JSON representation
        #[arg(long)]
        json: bool,
    },
    /// Set or clear the API key
    Key {
        #[command(subcommand)]
        action: KeyCommand,
    },
    /// Manage model options
    Models {
        #[command(subcommand)]
        action: ModelsCommand,
    },
    /// Manage mini-apps
    App {
        #[command(subcommand)]
        action: AppCommand,
    },
    /// Set the theme (light, dark or system)
    Theme {
        /// Theme to apply
        theme: Theme,
    },
    /// Show configuration
    Config {
        /// Print the config file path instead of its contents
        #[arg(long)]
        path: bool,
    },
}

#[derive(Subcommand)]
enum KeyCommand {
    /// Store an API key
    Set {
        /// The API key
        key: String,

        /// Keep the key for this session only; never write it to disk
        #[arg(long)]
        no_save: bool,
    },
    /// Remove the API key
    Clear,
}

#[derive(Subcommand)]
enum ModelsCommand {
    /// List model options
    List,
    /// Add a model option
    Add {
        /// Model identifier sent to the backend
        id: String,

        /// Label shown to the user
        label: String,
    },
    /// Remove a model option
    Remove {
        /// Model identifier
        id: String,
    },
    /// Restore the built-in model options
    Reset,
}

#[derive(Subcommand)]
enum AppCommand {
    /// List mini-apps
    List,
    /// Create a mini-app and select it
    Add {
        /// Display name
        #[arg(long)]
        name: String,

        /// Model identifier (defaults to the first model option)
        #[arg(long)]
        model: Option<String>,

        /// System prompt
        #[arg(long)]
        prompt: Option<String>,
    },
    /// Edit a mini-app
    Edit {
        /// Mini-app id or unique id prefix
        id: String,

        /// New display name
        #[arg(long)]
        name: Option<String>,

        /// New model identifier
        #[arg(long)]
        model: Option<String>,

        /// New system prompt
        #[arg(long)]
        prompt: Option<String>,
    },
    /// Delete a mini-app
    Delete {
        /// Mini-app id or unique id prefix
        id: String,
    },
    /// Select a mini-app
    Use {
        /// Mini-app id or unique id prefix
        id: String,
    },
    /// Clear the selection
    Deselect,
}

fn main() -> Result<()> {
    init_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Let --help and --version exit normally
            if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion
            {
                e.exit();
            }
            // For actual errors, show error + help
            eprintln!("error: {}\n", e.kind());
            Cli::command().print_help()?;
            std::process::exit(1);
        }
    };

    if let Err(e) = cli::run(cli.command) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

// Log to the temp dir - tail with: tail -f /tmp/promptlet.log
// Set DEBUG=0-3 to control verbosity (0=off, 1=warn, 2=info, 3=debug)
fn init_logging() {
    let debug_level = std::env::var("DEBUG")
        .ok()
        .and_then(|v| v.parse::<u8>().ok())
        .unwrap_or(0);

    if debug_level == 0 {
        return;
    }

    let level = match debug_level {
        1 => tracing::Level::WARN,
        2 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };

    let log_path = promptlet::paths::log_path();
    let (Some(dir), Some(file_name)) = (log_path.parent(), log_path.file_name()) else {
        return;
    };

    // Start each run with an empty log
    if let Err(e) = std::fs::write(&log_path, "") {
        eprintln!("Warning: Failed to clear log file: {e}");
    }

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    tracing_subscriber::fmt()
        .with_writer(file_appender)
        .with_max_level(level)
        .with_ansi(false)
        .init();
}
