//! Document module.
//!
//! Documents are the flattened, search-engine-ready records derived from
//! entities by the [`crate::mapping`] module.

#[allow(clippy::module_inception)]
pub mod document;
pub mod field_value;

// Re-export commonly used types
pub use document::{DOCUMENT_KEY_FIELD, Document, DocumentField, FieldModifier};
pub use field_value::{FieldMap, FieldValue};
