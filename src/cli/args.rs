//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Turn YAML outline documents into labeled trees
#[derive(Parser, Debug)]
#[command(name = "mindtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Maximum item nesting depth (overrides config)
    #[arg(long, global = true)]
    pub max_depth: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the outline as a tree
    Show {
        /// Outline file, `-` for stdin
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Print the tree as JSON for chart widgets
    Json {
        /// Outline file, `-` for stdin
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Emit the root object instead of a one-element list
        #[arg(long)]
        bare: bool,
        /// Single-line output
        #[arg(long)]
        compact: bool,
    },

    /// Validate outlines and show their size
    Check {
        /// Outline files, `-` for stdin
        #[arg(required = true, value_hint = ValueHint::FilePath)]
        files: Vec<PathBuf>,
    },

    /// List leaf names
    Leaves {
        /// Outline file, `-` for stdin
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// List root-to-leaf paths
    Paths {
        /// Outline file, `-` for stdin
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Separator between names
        #[arg(short, long, default_value = " > ")]
        separator: String,
    },

    /// Rewrite an outline in canonical form
    Fmt {
        /// Outline file, `-` for stdin
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Replace the file instead of printing
        #[arg(short, long)]
        write: bool,
    },

    /// Create a starter outline
    New {
        /// File to create
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Root name (default: config root_template)
        #[arg(short, long)]
        root: Option<String>,
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Show config file locations
    Path,
    /// Print a template config file
    Template,
}
