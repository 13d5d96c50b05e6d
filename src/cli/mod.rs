//! Command-line interface for the mlog application.
//!
//! Arguments are parsed with clap's derive API. Running `mlog` with no
//! subcommand behaves like `mlog add`, so the entry options are accepted both at
//! the top level and on the `add` subcommand.

use crate::constants::{APP_DESCRIPTION, APP_NAME};
use clap::{Args, Parser, Subcommand};

/// Keep a markdown logbook of dated entries in categorized folders
#[derive(Parser, Debug)]
#[command(name = APP_NAME, about = APP_DESCRIPTION, author, version, long_about = None)]
pub struct CliArgs {
    /// Print verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Entry options used when no subcommand is given
    #[command(flatten)]
    pub add: AddArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options for saving a new entry.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct AddArgs {
    /// Category to file the entry under (defaults to the configured default category)
    #[arg(short = 'c', long)]
    pub category: Option<String>,

    /// Date of the entry, e.g. 2017-11-10 or yesterday (defaults to today)
    #[arg(short = 'd', long)]
    pub date: Option<String>,

    /// Replace an existing entry for the same category and date
    #[arg(short = 'o', long)]
    pub overwrite: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Save the text piped on stdin as a log entry
    Add(AddArgs),

    /// Set up a logbook in the given directory
    Init {
        /// Directory that will hold the logbook
        directory: String,
    },

    /// Show or change the logbook configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Regenerate every category index and the main index
    Rebuild,

    /// List the configured categories
    Categories,

    /// Open the logbook directory in the system file browser
    Open,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigAction {
    /// Print the logbook configuration
    Show,

    /// Set a string or number option (defaultCategory, fileNameFormat, title, serverPort)
    Set {
        /// Option name
        name: String,
        /// New value
        value: String,
    },

    /// Add a value to a list option (categories)
    Add {
        /// Option name
        name: String,
        /// Value to add
        value: String,
    },
}

impl CliArgs {
    /// The entry options to use for `add`, whether given explicitly or at the top level.
    pub fn add_args(&self) -> Option<&AddArgs> {
        match &self.command {
            None => Some(&self.add),
            Some(Commands::Add(args)) => Some(args),
            Some(_) => None,
        }
    }
}
