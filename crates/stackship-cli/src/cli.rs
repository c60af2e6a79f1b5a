//! CLI definition using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use stackship_types::{OutputFormat, TaxStatus};

#[derive(Parser)]
#[command(name = "stackable-shipping")]
#[command(version)]
#[command(about = "Per-carrier shipping rates with volumetric weight for stackable products")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Carrier store directory. Uses config value if not specified.
    #[arg(long, global = true)]
    pub store_dir: Option<PathBuf>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage carriers and their rate tables
    Carriers {
        #[command(subcommand)]
        action: CarrierCommands,
    },

    /// Show actual and volumetric weight of a cart
    Weight {
        /// Cart file (.json or .csv)
        cart: PathBuf,

        /// Volumetric divisor (positive). Uses config value if not specified.
        #[arg(long, short = 'd')]
        divisor: Option<u32>,
    },

    /// Price a cart against the configured carriers
    Quote {
        /// Cart file (.json or .csv)
        cart: PathBuf,

        /// Only quote this carrier id
        #[arg(long, short = 'c')]
        carrier: Option<String>,
    },

    /// Show or modify configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set carrier store directory
        #[arg(long)]
        set_store_dir: Option<PathBuf>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set default volumetric divisor
        #[arg(long)]
        set_divisor: Option<u32>,

        /// Set shipping method title
        #[arg(long)]
        set_title: Option<String>,

        /// Set tax status of shipping rates
        #[arg(long)]
        set_tax_status: Option<TaxStatus>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Subcommand)]
pub enum CarrierCommands {
    /// List carriers
    List {
        /// Only enabled carriers
        #[arg(long)]
        enabled: bool,
    },

    /// Show one carrier with its rate table
    Show {
        /// Carrier id
        id: String,
    },

    /// Create or update a carrier from a JSON form file
    Save {
        /// JSON file with the carrier fields
        file: PathBuf,
    },

    /// Import carriers from a JSON or TOML file
    Import {
        /// Carrier list (.json array or .toml with [[carriers]])
        file: PathBuf,

        /// Validate without saving
        #[arg(long)]
        dry_run: bool,
    },

    /// Delete a carrier
    Delete {
        /// Carrier id
        id: String,
    },

    /// Install the default carrier when none are configured
    Init,
}
