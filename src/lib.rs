//! # solrmap
//!
//! Maps domain entities onto flat search documents and builds queries
//! against those documents through a field alias table.
//!
//! ## Features
//!
//! - Recursive flattening of related objects and collections
//! - Configured getter expressions with literal arguments
//! - Synthetic, time-ordered document keys
//! - Per-field update modifiers (set / add / remove)
//! - Boolean field queries with phrase quoting and wildcards
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use solrmap::prelude::*;
//!
//! struct Book {
//!     id: u32,
//!     title: String,
//! }
//!
//! let mut metadata = MetadataRegistry::new();
//! metadata.register(|book: &Book| {
//!     MetaInformation::new(book.id.to_string(), "book")
//!         .with_field(FieldDescriptor::value("title", book.title.as_str()).with_alias("title_s"))
//! });
//!
//! let mapper = DocumentMapper::new(Arc::new(metadata), Arc::new(AccessorRegistry::new()));
//! let book = entity(Book { id: 1, title: "Dune".to_string() });
//!
//! let document = mapper.map_entity(book.as_ref()).unwrap().unwrap();
//! assert_eq!(document.key(), "1");
//! assert_eq!(document.get_field("title_s"), Some(&FieldValue::from("Dune")));
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod document;
pub mod error;
pub mod mapping;
pub mod query;
pub mod repository;
pub mod transport;

pub mod prelude {
    pub use crate::client::SolrClient;
    pub use crate::config::{QueryDefaults, SolrmapConfig};
    pub use crate::document::{Document, FieldModifier, FieldValue};
    pub use crate::error::{Result, SolrmapError};
    pub use crate::mapping::{
        AccessorRegistry, AccessorValue, DocumentMapper, Entity, EntityRef, FieldDescriptor,
        MapperConfig, MetaInformation, MetadataProvider, MetadataRegistry, entity,
    };
    pub use crate::query::{AliasTable, FieldMappedQuery};
    pub use crate::repository::Repository;
    pub use crate::transport::{SearchRequest, Transport};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
