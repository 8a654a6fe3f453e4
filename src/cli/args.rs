//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint};

use crate::traversal::Order;

/// Generate, render and walk random trees
#[derive(Parser, Debug)]
#[command(name = "orchard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Turn debugging information on (repeat for more: -d -d -d)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Extra settings file, layered over the global one
    #[arg(short, long, global = true, env = "ORCHARD_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Overrides for tree generation; unset values come from the settings.
#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Number of nodes
    #[arg(short = 'n', long)]
    pub size: Option<usize>,

    /// Chance (0.0 - 1.0) that a new node becomes the next attachment point
    #[arg(short, long)]
    pub branch_chance: Option<f64>,

    /// RNG seed for a reproducible tree
    #[arg(short, long)]
    pub seed: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a random tree and print it
    Generate(GenerateArgs),

    /// Generate a random tree and print every node in visiting order
    Walk {
        #[command(flatten)]
        generate: GenerateArgs,

        /// Visiting order
        #[arg(short, long, value_enum)]
        order: Option<Order>,
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
    /// Show merged settings
    Show,

    /// Print a commented settings template
    Template,

    /// Show the global settings path
    Path,
}
