//! Command implementations for the solrmap CLI.

use log::info;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::SolrmapConfig;
use crate::error::{Result, SolrmapError};
use crate::mapping::accessor::AccessorCall;
use crate::query::mapped::FieldMappedQuery;

/// Execute a CLI command.
pub fn execute_command(args: SolrmapArgs) -> Result<()> {
    match &args.command {
        Command::Query(query_args) => render_query(query_args, &args),
        Command::Accessor(accessor_args) => parse_accessor(accessor_args, &args),
    }
}

/// Render a query from the configured alias table.
fn render_query(args: &QueryArgs, cli_args: &SolrmapArgs) -> Result<()> {
    info!("loading configuration from {}", args.config.display());
    let config = SolrmapConfig::from_file(&args.config)?;
    let query = build_query(&config, args)?;

    let result = QueryResult {
        query: query.get_query(),
        fields: query.get_fields().to_vec(),
        search_terms: query
            .get_search_terms()
            .iter()
            .map(|(field, term)| TermBinding {
                field: field.clone(),
                term: term.clone(),
            })
            .collect(),
    };

    output_result("Rendered query", &result, cli_args)
}

/// Build the query described by the command line.
pub fn build_query(config: &SolrmapConfig, args: &QueryArgs) -> Result<FieldMappedQuery> {
    let mut query = config.create_query();

    for field in &args.fields {
        query.add_field(field);
    }
    for term in &args.terms {
        let (name, value) = parse_term(term)?;
        query.add_search_term(name, value);
    }
    if let Some(term) = &args.all {
        query.query_all_fields(term.as_str());
    }
    if args.and {
        query.set_use_and_operator(true);
    }
    if args.wildcard {
        query.set_use_wildcard(true);
    }

    Ok(query)
}

/// Split a `NAME=VALUE` term argument.
pub fn parse_term(arg: &str) -> Result<(&str, &str)> {
    match arg.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim(), value)),
        _ => Err(SolrmapError::invalid_argument(format!(
            "search term `{arg}` must be NAME=VALUE"
        ))),
    }
}

/// Print the parsed form of a getter expression.
fn parse_accessor(args: &AccessorArgs, cli_args: &SolrmapArgs) -> Result<()> {
    let call = AccessorCall::parse(&args.expression)?;
    let result = AccessorResult {
        method: call.method().to_string(),
        args: call.args().to_vec(),
    };

    output_result("Parsed accessor", &result, cli_args)
}
