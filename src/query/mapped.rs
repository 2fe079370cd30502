//! Field-mapped query builder.
//!
//! [`FieldMappedQuery`] collects projection fields and search terms by
//! logical field name and translates them through an [`AliasTable`].
//! Names missing from the table are dropped without error, so one generic
//! helper can query entities whose field sets differ.
//!
//! ```
//! use solrmap::query::{AliasTable, FieldMappedQuery};
//!
//! let aliases: AliasTable = [("title", "title_s"), ("text", "text_t")].into_iter().collect();
//!
//! let mut query = FieldMappedQuery::new(aliases);
//! query.add_search_term("title", "foo").add_search_term("text", "bar");
//!
//! assert_eq!(query.get_query(), "title_s:foo OR text_t:bar");
//! ```

use std::fmt;
use std::sync::Arc;

use log::trace;

use crate::config::QueryDefaults;
use crate::query::alias::AliasTable;

/// A boolean field query built from logical field names.
///
/// Not meant to be mutated concurrently; once built it can be shared
/// read-only.
#[derive(Debug, Clone)]
pub struct FieldMappedQuery {
    aliases: Arc<AliasTable>,
    fields: Vec<String>,
    search_terms: Vec<(String, String)>,
    use_and_operator: bool,
    use_wildcard: bool,
}

impl FieldMappedQuery {
    /// Create an empty query over the given alias table.
    pub fn new<A: Into<Arc<AliasTable>>>(aliases: A) -> Self {
        FieldMappedQuery {
            aliases: aliases.into(),
            fields: Vec::new(),
            search_terms: Vec::new(),
            use_and_operator: false,
            use_wildcard: false,
        }
    }

    /// Apply configured operator and wildcard defaults.
    pub fn with_defaults(mut self, defaults: &QueryDefaults) -> Self {
        self.use_and_operator = defaults.use_and_operator;
        self.use_wildcard = defaults.use_wildcard;
        self
    }

    /// Add a projection field. Unmapped names are ignored.
    pub fn add_field(&mut self, logical: &str) -> &mut Self {
        match self.aliases.resolve(logical) {
            Some(indexed) => {
                if !self.fields.iter().any(|f| f == indexed) {
                    self.fields.push(indexed.to_string());
                }
            }
            None => trace!("dropping unmapped projection field `{logical}`"),
        }
        self
    }

    /// Bind a term to a field. Unmapped names are ignored.
    ///
    /// Binding the same field again replaces the term and keeps the
    /// field's original position.
    pub fn add_search_term<T: Into<String>>(&mut self, logical: &str, term: T) -> &mut Self {
        match self.aliases.resolve(logical) {
            Some(indexed) => {
                let indexed = indexed.to_string();
                self.bind(indexed, term.into());
            }
            None => trace!("dropping unmapped search field `{logical}`"),
        }
        self
    }

    /// Bind `term` to every field of the alias table, in table order.
    pub fn query_all_fields<T: Into<String>>(&mut self, term: T) -> &mut Self {
        let term = term.into();
        let aliases = Arc::clone(&self.aliases);
        for (_, indexed) in aliases.iter() {
            self.bind(indexed.to_string(), term.clone());
        }
        self
    }

    /// Join clauses with `AND` instead of `OR`.
    pub fn set_use_and_operator(&mut self, use_and_operator: bool) -> &mut Self {
        self.use_and_operator = use_and_operator;
        self
    }

    /// Quote every term and surround it with `*`.
    pub fn set_use_wildcard(&mut self, use_wildcard: bool) -> &mut Self {
        self.use_wildcard = use_wildcard;
        self
    }

    fn bind(&mut self, indexed: String, term: String) {
        match self.search_terms.iter_mut().find(|(field, _)| *field == indexed) {
            Some(entry) => entry.1 = term,
            None => self.search_terms.push((indexed, term)),
        }
    }

    /// Render the query string, e.g. `title_s:foo OR text_t:"foo bar"`.
    ///
    /// An empty term list renders as an empty string.
    pub fn get_query(&self) -> String {
        let operator = if self.use_and_operator { " AND " } else { " OR " };
        self.search_terms
            .iter()
            .map(|(field, term)| format!("{field}:{}", self.render_term(term)))
            .collect::<Vec<_>>()
            .join(operator)
    }

    fn render_term(&self, term: &str) -> String {
        if self.use_wildcard {
            format!("\"*{term}*\"")
        } else if term.contains(' ') {
            format!("\"{term}\"")
        } else {
            term.to_string()
        }
    }

    /// Indexed projection fields in insertion order.
    pub fn get_fields(&self) -> &[String] {
        &self.fields
    }

    /// `(indexed field, term)` bindings in insertion order.
    pub fn get_search_terms(&self) -> &[(String, String)] {
        &self.search_terms
    }

    /// Term bound to an indexed field.
    pub fn search_term(&self, indexed: &str) -> Option<&str> {
        self.search_terms
            .iter()
            .find(|(field, _)| field == indexed)
            .map(|(_, term)| term.as_str())
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn use_and_operator(&self) -> bool {
        self.use_and_operator
    }

    pub fn use_wildcard(&self) -> bool {
        self.use_wildcard
    }

    /// Check whether no search term has been bound.
    pub fn is_empty(&self) -> bool {
        self.search_terms.is_empty()
    }
}

impl fmt::Display for FieldMappedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.get_query())
    }
}
