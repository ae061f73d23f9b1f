//! CLI definition using clap

use clap::{Args, Parser, Subcommand};
use pipeweight_types::{OutputFormat, Shape};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pipe-weight")]
#[command(author)]
#[command(version)]
#[command(about = "Weight and price estimation for stainless and mild steel pipes")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Spec table TOML replacing the built-in catalogue
    #[arg(long, global = true)]
    pub spec_table: Option<PathBuf>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Where pipe entries come from. Sources are combined in the order given.
#[derive(Args, Debug, Clone, Default)]
pub struct EntryInput {
    /// Pipe entry as MATERIAL,THICKNESS,SHAPE,SIZE,LENGTH
    /// (e.g. "SS,1mm,Round,1-inch,10"). Repeatable.
    #[arg(long = "pipe", short = 'p')]
    pub pipes: Vec<String>,

    /// JSON file with {"pipesData": [...]} or a bare array of entries
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// CSV file with header material,thickness,shape,pipeType,length
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Calculate total weight and price
    Calc {
        #[command(flatten)]
        input: EntryInput,

        /// Send entries to the calculation endpoint instead of computing locally
        #[arg(long)]
        remote: bool,

        /// Endpoint base URL (overrides config)
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// List pipe specs
    Specs {
        /// Only list sizes offered for this shape
        #[arg(long)]
        shape: Option<Shape>,
    },

    /// Export totals to PDF (or Excel breakdown)
    Export {
        #[command(flatten)]
        input: EntryInput,

        /// Output file path
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Write an Excel breakdown instead of a PDF
        #[arg(long)]
        xlsx: bool,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set listen host for the endpoint
        #[arg(long)]
        set_host: Option<String>,

        /// Set listen port for the endpoint
        #[arg(long)]
        set_port: Option<u16>,

        /// Set allowed CORS origins (comma separated, "*" for any)
        #[arg(long, value_delimiter = ',')]
        set_origins: Option<Vec<String>>,

        /// Set endpoint URL used by clients
        #[arg(long)]
        set_endpoint: Option<String>,

        /// Set spec table TOML path
        #[arg(long)]
        set_spec_table: Option<PathBuf>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set currency label
        #[arg(long)]
        set_currency: Option<String>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
