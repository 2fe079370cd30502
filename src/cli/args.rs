//! Command line argument parsing for the solrmap CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// solrmap - entity-to-document mapping and field-aliased queries
#[derive(Parser, Debug, Clone)]
#[command(name = "solrmap")]
#[command(about = "Build field-aliased search queries and inspect accessor expressions")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SolrmapArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SolrmapArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Render a query from logical field names
    Query(QueryArgs),

    /// Parse a getter expression
    Accessor(AccessorArgs),
}

/// Arguments for rendering a query
#[derive(Parser, Debug, Clone)]
pub struct QueryArgs {
    /// Configuration file (JSON) holding the alias table
    #[arg(short, long, value_name = "CONFIG_FILE", env = "SOLRMAP_CONFIG")]
    pub config: PathBuf,

    /// Projection field (logical name); may be repeated
    #[arg(long = "field", value_name = "NAME")]
    pub fields: Vec<String>,

    /// Search term as NAME=VALUE; may be repeated
    #[arg(short, long = "term", value_name = "NAME=VALUE")]
    pub terms: Vec<String>,

    /// Search every aliased field for this term
    #[arg(short, long, value_name = "TERM")]
    pub all: Option<String>,

    /// Join clauses with AND (overrides the configuration)
    #[arg(long)]
    pub and: bool,

    /// Wildcard-decorate terms (overrides the configuration)
    #[arg(short, long)]
    pub wildcard: bool,
}

/// Arguments for parsing a getter expression
#[derive(Parser, Debug, Clone)]
pub struct AccessorArgs {
    /// Expression such as `getLabel('en', 2)`
    #[arg(value_name = "EXPRESSION")]
    pub expression: String,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
