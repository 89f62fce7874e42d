//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

/// Build trees from flat parent-linked records and query the data attached to them
#[derive(Parser, Debug)]
#[command(name = "treekit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Settings file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Tree records and the fields that link them.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// JSON file holding an array of records
    #[arg(value_hint = ValueHint::FilePath)]
    pub records: PathBuf,

    /// Identifier field (overrides settings)
    #[arg(long)]
    pub id: Option<String>,

    /// Parent identifier field (overrides settings)
    #[arg(long)]
    pub parent_id: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print every tree of the forest
    Tree {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Print the leaf ids of every tree
    Leaves {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Attach auxiliary records and print the data of one node
    Data {
        #[command(flatten)]
        source: SourceArgs,

        /// JSON file holding an array of auxiliary records
        #[arg(long, value_hint = ValueHint::FilePath)]
        data: PathBuf,

        /// Node whose data is printed
        #[arg(short, long)]
        node: String,

        /// Foreign-key field of the auxiliary records (overrides settings)
        #[arg(long)]
        reference_id: Option<String>,

        /// Collection the records are attached under (overrides settings)
        #[arg(long)]
        collection: Option<String>,

        /// Include the data of the whole subtree
        #[arg(short, long)]
        recursive: bool,
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
    /// Show merged config
    Show,

    /// Show config paths
    Path,
}
