//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, SolrmapArgs};
use crate::error::Result;

/// Human-readable rendering of a command result.
pub trait HumanOutput {
    fn human(&self) -> String;
}

/// One `(indexed field, term)` binding.
#[derive(Debug, Serialize, Deserialize)]
pub struct TermBinding {
    pub field: String,
    pub term: String,
}

/// Result structure for the query command.
#[derive(Debug, Serialize, Deserialize)]
pub struct QueryResult {
    pub query: String,
    pub fields: Vec<String>,
    pub search_terms: Vec<TermBinding>,
}

impl HumanOutput for QueryResult {
    fn human(&self) -> String {
        let mut out = String::new();
        if !self.fields.is_empty() {
            out.push_str(&format!("fields: {}\n", self.fields.join(",")));
        }
        out.push_str(&self.query);
        out
    }
}

/// Result structure for the accessor command.
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessorResult {
    pub method: String,
    pub args: Vec<String>,
}

impl HumanOutput for AccessorResult {
    fn human(&self) -> String {
        let mut out = format!("method: {}", self.method);
        for (i, arg) in self.args.iter().enumerate() {
            out.push_str(&format!("\narg {i}: {arg}"));
        }
        out
    }
}

/// Format a result in the requested output format.
pub fn format_result<T: Serialize + HumanOutput>(result: &T, args: &SolrmapArgs) -> Result<String> {
    match args.output_format {
        OutputFormat::Human => Ok(result.human()),
        OutputFormat::Json if args.pretty => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Json => Ok(serde_json::to_string(result)?),
    }
}

/// Print a result in the requested output format.
pub fn output_result<T: Serialize + HumanOutput>(
    message: &str,
    result: &T,
    args: &SolrmapArgs,
) -> Result<()> {
    if args.output_format == OutputFormat::Human && args.verbosity() > 1 {
        println!("{message}");
        println!();
    }
    println!("{}", format_result(result, args)?);
    Ok(())
}
