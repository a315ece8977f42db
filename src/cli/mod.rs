//! CLI argument definitions for the `cv` tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// cv - inspect and modify clipvault daemon settings.
#[derive(Parser, Debug)]
#[command(name = "cv")]
#[command(author, version, about = "Inspect and modify clipvault daemon settings", long_about = None)]
pub struct Cli {
    /// Output in human-readable format instead of JSON
    #[arg(short = 'H', long = "human", global = true)]
    pub human_readable: bool,

    /// Path to the settings file. Defaults to ~/.config/clipvault/settings.kdl.
    /// Can also be set via the CV_STORE environment variable.
    #[arg(short = 'S', long = "store", global = true, env = "CV_STORE")]
    pub store_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the current value of a setting
    Get {
        /// Setting name (e.g. max-history-size)
        key: String,
    },

    /// Change a setting
    ///
    /// The value is parsed according to the setting's type: booleans take
    /// "true" or "false", unsigned settings take a decimal integer, text
    /// settings take the value verbatim (but never empty).
    Set {
        /// Setting name (e.g. max-history-size)
        key: String,
        /// New value
        value: String,
    },

    /// List every setting with its type and current value
    List,

    /// Stream change events until interrupted
    ///
    /// Polls the settings file for external edits and prints one line per
    /// changed/rebind/track event. Stop with Ctrl-C.
    Watch {
        /// Poll interval in milliseconds
        #[arg(long, default_value_t = 500)]
        interval: u64,
    },
}
