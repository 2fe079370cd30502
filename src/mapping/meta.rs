//! Mapping metadata for a single entity.
//!
//! [`MetaInformation`] is what a [`crate::mapping::metadata::MetadataProvider`]
//! produces for an entity: the document key and name, a document boost, and
//! the ordered list of [`FieldDescriptor`]s the mapper walks.

use crate::document::{FieldModifier, FieldValue};
use crate::mapping::entity::EntityRef;
use crate::query::alias::AliasTable;

/// The raw value of a mapped attribute.
#[derive(Debug, Clone)]
pub enum FieldSource {
    /// A document-safe value assigned as-is.
    Value(FieldValue),
    /// A related object, flattened into a sub-document.
    Object(EntityRef),
    /// A collection of related objects.
    Collection(Vec<EntityRef>),
}

/// Describes how one entity attribute maps into a document field.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    name: String,
    alias: Option<String>,
    source: FieldSource,
    boost: f32,
    modifier: Option<FieldModifier>,
    getter: Option<String>,
}

impl FieldDescriptor {
    /// Create a descriptor with the default boost and no alias, modifier or getter.
    pub fn new<S: Into<String>>(name: S, source: FieldSource) -> Self {
        FieldDescriptor {
            name: name.into(),
            alias: None,
            source,
            boost: 1.0,
            modifier: None,
            getter: None,
        }
    }

    /// Create a descriptor for a document-safe value.
    pub fn value<S: Into<String>, V: Into<FieldValue>>(name: S, value: V) -> Self {
        Self::new(name, FieldSource::Value(value.into()))
    }

    /// Create a descriptor for a related object.
    pub fn object<S: Into<String>>(name: S, object: EntityRef) -> Self {
        Self::new(name, FieldSource::Object(object))
    }

    /// Create a descriptor for a collection of related objects.
    pub fn collection<S: Into<String>>(name: S, elements: Vec<EntityRef>) -> Self {
        Self::new(name, FieldSource::Collection(elements))
    }

    /// Set the indexed field name.
    pub fn with_alias<S: Into<String>>(mut self, alias: S) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Set the field boost. Negative values are clamped to zero.
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost.max(0.0);
        self
    }

    /// Set the update modifier.
    pub fn with_modifier(mut self, modifier: FieldModifier) -> Self {
        self.modifier = Some(modifier);
        self
    }

    /// Set the getter expression used for related objects.
    pub fn with_getter<S: Into<String>>(mut self, getter: S) -> Self {
        self.getter = Some(getter.into());
        self
    }

    /// Logical field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Indexed field name; defaults to the logical name.
    pub fn alias(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    pub fn source(&self) -> &FieldSource {
        &self.source
    }

    pub fn boost(&self) -> f32 {
        self.boost
    }

    pub fn modifier(&self) -> Option<FieldModifier> {
        self.modifier
    }

    /// Getter expression, if one is configured and non-empty.
    pub fn getter(&self) -> Option<&str> {
        self.getter.as_deref().filter(|g| !g.trim().is_empty())
    }
}

/// Mapping metadata of one entity.
#[derive(Debug, Clone)]
pub struct MetaInformation {
    document_key: String,
    document_name: String,
    boost: f32,
    fields: Vec<FieldDescriptor>,
    generates_document_id: bool,
}

impl MetaInformation {
    /// Create metadata for a document with the given key and name.
    pub fn new<K: Into<String>, N: Into<String>>(document_key: K, document_name: N) -> Self {
        MetaInformation {
            document_key: document_key.into(),
            document_name: document_name.into(),
            boost: 1.0,
            fields: Vec::new(),
            generates_document_id: false,
        }
    }

    /// Set the document boost.
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }

    /// Append a field descriptor.
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Append several field descriptors.
    pub fn with_fields<I: IntoIterator<Item = FieldDescriptor>>(mut self, fields: I) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Request a synthetic, time-ordered document key.
    pub fn generating_document_id(mut self, generate: bool) -> Self {
        self.generates_document_id = generate;
        self
    }

    pub fn document_key(&self) -> &str {
        &self.document_key
    }

    pub fn document_name(&self) -> &str {
        &self.document_name
    }

    pub fn boost(&self) -> f32 {
        self.boost
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn generates_document_id(&self) -> bool {
        self.generates_document_id
    }

    /// Alias table mapping each logical field name to its indexed name.
    pub fn alias_table(&self) -> AliasTable {
        self.fields
            .iter()
            .map(|f| (f.name().to_string(), f.alias().to_string()))
            .collect()
    }
}
