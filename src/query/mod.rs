//! Query building over aliased field names.

pub mod alias;
pub mod mapped;

pub use alias::AliasTable;
pub use mapped::FieldMappedQuery;
