//! Configuration for solrmap.
//!
//! A configuration file is a JSON object with optional `mapper`, `query`
//! and `aliases` sections:
//!
//! ```json
//! {
//!   "mapper": { "max_depth": 8, "detect_cycles": true },
//!   "query": { "use_and_operator": false, "use_wildcard": true },
//!   "aliases": { "title": "title_s", "text": "text_t" }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SolrmapError};
use crate::mapping::mapper::MapperConfig;
use crate::query::alias::AliasTable;
use crate::query::mapped::FieldMappedQuery;

/// Default flags for newly created queries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryDefaults {
    /// Join clauses with `AND` instead of `OR`.
    pub use_and_operator: bool,
    /// Decorate terms with wildcards.
    pub use_wildcard: bool,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolrmapConfig {
    /// Document mapper settings.
    pub mapper: MapperConfig,
    /// Query defaults.
    pub query: QueryDefaults,
    /// Alias table used by queries built from this configuration.
    pub aliases: AliasTable,
}

impl SolrmapConfig {
    /// Load a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config: SolrmapConfig = serde_json::from_str(&content).map_err(|e| {
            SolrmapError::config(format!("invalid configuration {}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for values the mapper cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.mapper.max_depth == 0 {
            return Err(SolrmapError::config("mapper.max_depth must be at least 1"));
        }
        Ok(())
    }

    /// Create an empty query over the configured aliases and defaults.
    pub fn create_query(&self) -> FieldMappedQuery {
        FieldMappedQuery::new(self.aliases.clone()).with_defaults(&self.query)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = SolrmapConfig::default();
        assert_eq!(config.mapper.max_depth, 16);
        assert!(config.mapper.detect_cycles);
        assert!(!config.query.use_and_operator);
        assert!(!config.query.use_wildcard);
        assert!(config.aliases.is_empty());
    }

    #[test]
    fn test_from_file_with_partial_sections() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"query": {{"use_wildcard": true}}, "aliases": {{"title": "title_s", "text": "text_t"}}}}"#
        )
        .unwrap();

        let config = SolrmapConfig::from_file(file.path()).unwrap();
        assert_eq!(config.mapper, MapperConfig::default());
        assert!(config.query.use_wildcard);
        assert_eq!(config.aliases.resolve("text"), Some("text_t"));

        let mut query = config.create_query();
        query.add_search_term("title", "foo");
        assert_eq!(query.get_query(), r#"title_s:"*foo*""#);
    }

    #[test]
    fn test_zero_depth_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"mapper": {{"max_depth": 0}}}}"#).unwrap();

        assert!(matches!(
            SolrmapConfig::from_file(file.path()),
            Err(SolrmapError::Config(_))
        ));
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(matches!(
            SolrmapConfig::from_file(file.path()),
            Err(SolrmapError::Config(_))
        ));
    }
}
