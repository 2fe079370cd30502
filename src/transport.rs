//! Boundary to the search server.
//!
//! solrmap does not talk to a search server itself. A [`Transport`]
//! implementation sends documents, executes [`SearchRequest`]s and clears
//! the index; its errors are handed back to callers unchanged.

use crate::document::Document;
use crate::error::Result;
use crate::mapping::entity::EntityRef;
use crate::query::mapped::FieldMappedQuery;

/// A search the transport should execute.
#[derive(Debug, Clone)]
pub enum SearchRequest {
    /// Fetch the document with the given key.
    Identifier { document_name: String, key: String },
    /// Fetch every document of a document type.
    DocumentName { document_name: String },
    /// Run a field-mapped query against a document type.
    Mapped {
        document_name: String,
        query: FieldMappedQuery,
    },
}

impl SearchRequest {
    /// Document type the request is scoped to.
    pub fn document_name(&self) -> &str {
        match self {
            SearchRequest::Identifier { document_name, .. }
            | SearchRequest::DocumentName { document_name }
            | SearchRequest::Mapped { document_name, .. } => document_name,
        }
    }
}

/// Transmits documents and queries to the search server.
pub trait Transport: Send + Sync {
    /// Index or update a document.
    fn send(&self, document: &Document) -> Result<()>;

    /// Execute a search and return the matched entities in result order.
    fn search(&self, request: &SearchRequest) -> Result<Vec<EntityRef>>;

    /// Remove every document from the index.
    fn clear_index(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::alias::AliasTable;

    #[test]
    fn test_document_name() {
        let request = SearchRequest::Identifier {
            document_name: "book".to_string(),
            key: "1".to_string(),
        };
        assert_eq!(request.document_name(), "book");

        let request = SearchRequest::Mapped {
            document_name: "author".to_string(),
            query: FieldMappedQuery::new(AliasTable::new()),
        };
        assert_eq!(request.document_name(), "author");
    }
}
