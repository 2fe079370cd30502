//! Entity-to-document mapping.
//!
//! - [`entity`] - the [`Entity`] capability every mapped object has
//! - [`meta`] - per-entity mapping metadata
//! - [`metadata`] - providers that produce that metadata
//! - [`accessor`] - configured getter expressions
//! - [`mapper`] - the engine that flattens entities into documents

pub mod accessor;
pub mod entity;
pub mod mapper;
pub mod meta;
pub mod metadata;

pub use accessor::{AccessorCall, AccessorRegistry, AccessorValue};
pub use entity::{Entity, EntityRef, entity};
pub use mapper::{DocumentMapper, MapperConfig};
pub use meta::{FieldDescriptor, FieldSource, MetaInformation};
pub use metadata::{MetadataProvider, MetadataRegistry};
