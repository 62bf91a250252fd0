use clap::{ArgAction, Parser, Subcommand};
use notekeep_core::NoteId;
use std::path::PathBuf;

/// Main CLI structure
#[derive(Parser)]
#[command(name = "notes")]
#[command(about = "Create, list, search and remove tagged notes")]
#[command(version)]
pub struct Cli {
    /// Note database file (overrides NOTEKEEP_DB and the config file)
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Configuration file (overrides NOTEKEEP_CONFIG)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output as JSON for machine processing
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand)]
pub enum Commands {
    /// Create the note database if it does not exist yet
    Init,

    /// Create a new note
    New {
        /// The content of the note (read from stdin when omitted)
        note: Option<String>,

        /// Comma-separated tags to add to the note
        #[arg(short, long, required = true)]
        tags: String,
    },

    /// List all notes
    All,

    /// List notes whose content contains the filter (case-insensitive)
    Find {
        /// Search term, matched against note content only
        filter: String,
    },

    /// Remove a note by id
    Remove {
        /// The id of the note to remove
        id: NoteId,
    },

    /// Launch a website to browse notes
    Web {
        /// Port to bind on
        #[arg(default_value_t = 5000)]
        port: u16,
    },

    /// Remove all notes
    Clean,

    /// Show the effective configuration and database location
    Config,

    /// Generate a shell completion script
    #[cfg(feature = "completions")]
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}
