//! Document mapping engine.
//!
//! [`DocumentMapper`] turns [`MetaInformation`] into a flattened
//! [`Document`]. Related objects and collections of related objects are
//! either reduced through a configured getter expression or mapped
//! recursively with their own metadata and flattened into field maps.
//!
//! Recursion is bounded by [`MapperConfig::max_depth`]. With
//! [`MapperConfig::detect_cycles`] enabled, an entity that is already being
//! mapped further up the current path is reported as a mapping error
//! instead of being expanded again.

use std::sync::Arc;

use log::{debug, trace};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::document::{Document, FieldMap, FieldValue};
use crate::error::{Result, SolrmapError};
use crate::mapping::accessor::{AccessorRegistry, AccessorValue};
use crate::mapping::entity::{Entity, EntityRef, entity_address};
use crate::mapping::meta::{FieldDescriptor, FieldSource, MetaInformation};
use crate::mapping::metadata::MetadataProvider;

/// Configuration for the document mapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Maximum nesting depth of related objects.
    pub max_depth: usize,
    /// Reject entities that reference themselves through the current path.
    ///
    /// The path holds nested entities only. A reference back to the root
    /// entity is caught one level deeper, when the root's own related
    /// object is reached for the second time.
    pub detect_cycles: bool,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            max_depth: 16,
            detect_cycles: true,
        }
    }
}

/// Entities on the recursion path from the root document.
#[derive(Debug, Default)]
struct MappingPath {
    visiting: Vec<usize>,
}

impl MappingPath {
    fn depth(&self) -> usize {
        self.visiting.len()
    }

    fn contains(&self, address: usize) -> bool {
        self.visiting.contains(&address)
    }
}

/// Maps entity metadata onto flattened documents.
#[derive(Clone)]
pub struct DocumentMapper {
    metadata: Arc<dyn MetadataProvider>,
    accessors: Arc<AccessorRegistry>,
    config: MapperConfig,
}

impl std::fmt::Debug for DocumentMapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentMapper")
            .field("accessors", &self.accessors)
            .field("config", &self.config)
            .finish()
    }
}

impl DocumentMapper {
    /// Create a mapper with the default configuration.
    pub fn new(metadata: Arc<dyn MetadataProvider>, accessors: Arc<AccessorRegistry>) -> Self {
        DocumentMapper {
            metadata,
            accessors,
            config: MapperConfig::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: MapperConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    pub fn metadata(&self) -> &Arc<dyn MetadataProvider> {
        &self.metadata
    }

    pub fn accessors(&self) -> &Arc<AccessorRegistry> {
        &self.accessors
    }

    /// Map metadata onto a document.
    ///
    /// Returns `Ok(None)` when the metadata has no fields. The document is
    /// either complete or not returned at all.
    pub fn map_to_document(&self, meta: &MetaInformation) -> Result<Option<Document>> {
        let mut path = MappingPath::default();
        self.build(meta, &mut path)
    }

    /// Load the metadata of `entity` and map it.
    pub fn map_entity(&self, entity: &dyn Entity) -> Result<Option<Document>> {
        let meta = self.metadata.load_information(entity)?;
        self.map_to_document(&meta)
    }

    /// Map independent metadata instances in parallel, preserving order.
    pub fn map_many(&self, metas: &[MetaInformation]) -> Result<Vec<Option<Document>>> {
        metas
            .par_iter()
            .map(|meta| self.map_to_document(meta))
            .collect()
    }

    fn build(&self, meta: &MetaInformation, path: &mut MappingPath) -> Result<Option<Document>> {
        if meta.fields().is_empty() {
            return Ok(None);
        }

        let key = if meta.generates_document_id() {
            format!("{}_{}", meta.document_name(), Uuid::now_v7())
        } else {
            meta.document_key().to_string()
        };

        let mut document = Document::new(key);
        document.set_boost(meta.boost());

        for field in meta.fields() {
            let value = match field.source() {
                FieldSource::Collection(elements) => {
                    self.map_collection(meta, field, elements, path)?
                }
                FieldSource::Object(object) => self.map_object(meta, field, object, path)?,
                FieldSource::Value(value) => value.clone(),
            };
            document.add_field(field.alias(), value, field.boost());

            if let Some(modifier) = field.modifier() {
                document.set_field_modifier(field.alias(), modifier);
            }
        }

        debug!(
            "mapped document `{}` ({}) with {} field(s)",
            document.key(),
            meta.document_name(),
            document.len()
        );
        Ok(Some(document))
    }

    fn map_collection(
        &self,
        meta: &MetaInformation,
        field: &FieldDescriptor,
        elements: &[EntityRef],
        path: &mut MappingPath,
    ) -> Result<FieldValue> {
        let mut values = Vec::with_capacity(elements.len());

        match field.getter() {
            Some(getter) => {
                for element in elements {
                    match self.accessors.invoke(element.as_ref(), getter)? {
                        AccessorValue::Value(value) => values.push(value),
                        AccessorValue::Object(returned) => {
                            return Err(getter_returned_object(meta, field, returned.as_ref()));
                        }
                    }
                }
            }
            None => {
                for element in elements {
                    values.push(FieldValue::Map(self.map_nested(meta, field, element, path)?));
                }
            }
        }

        Ok(FieldValue::List(values))
    }

    fn map_object(
        &self,
        meta: &MetaInformation,
        field: &FieldDescriptor,
        object: &EntityRef,
        path: &mut MappingPath,
    ) -> Result<FieldValue> {
        match field.getter() {
            Some(getter) => match self.accessors.invoke(object.as_ref(), getter)? {
                AccessorValue::Value(value) => Ok(value),
                AccessorValue::Object(returned) => {
                    Err(getter_returned_object(meta, field, returned.as_ref()))
                }
            },
            None => Ok(FieldValue::Map(self.map_nested(meta, field, object, path)?)),
        }
    }

    fn map_nested(
        &self,
        meta: &MetaInformation,
        field: &FieldDescriptor,
        object: &EntityRef,
        path: &mut MappingPath,
    ) -> Result<FieldMap> {
        if path.depth() >= self.config.max_depth {
            return Err(SolrmapError::mapping(format!(
                "field `{}` of document `{}` exceeds the maximum nesting depth of {}",
                field.name(),
                meta.document_name(),
                self.config.max_depth
            )));
        }

        let address = entity_address(object);
        if self.config.detect_cycles && path.contains(address) {
            return Err(SolrmapError::mapping(format!(
                "cyclic reference to `{}` through field `{}` of document `{}`",
                object.as_ref().entity_type(),
                field.name(),
                meta.document_name()
            )));
        }

        let nested = self.metadata.load_information(object.as_ref())?;
        trace!(
            "mapping `{}` into field `{}` at depth {}",
            nested.document_name(),
            field.alias(),
            path.depth() + 1
        );

        path.visiting.push(address);
        let document = self.build(&nested, path);
        path.visiting.pop();

        Ok(document?.map(Document::into_field_map).unwrap_or_default())
    }
}

fn getter_returned_object(
    meta: &MetaInformation,
    field: &FieldDescriptor,
    returned: &dyn Entity,
) -> SolrmapError {
    SolrmapError::mapping(format!(
        "getter `{}` of field `{}` in document `{}` must return a scalar or sequence, got object `{}`",
        field.getter().unwrap_or_default(),
        field.name(),
        meta.document_name(),
        returned.entity_type()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::FieldModifier;
    use crate::mapping::entity::entity;
    use crate::mapping::metadata::MetadataRegistry;

    struct Tag {
        name: String,
    }

    struct Author {
        id: u32,
        name: String,
    }

    fn mapper() -> DocumentMapper {
        let mut metadata = MetadataRegistry::new();
        metadata.register(|tag: &Tag| {
            MetaInformation::new(format!("tag_{}", tag.name), "tag")
                .with_field(FieldDescriptor::value("name", tag.name.as_str()).with_alias("name_s"))
        });
        metadata.register(|author: &Author| {
            MetaInformation::new(format!("author_{}", author.id), "author")
                .with_field(FieldDescriptor::value("name", author.name.as_str()).with_alias("name_s"))
        });

        let mut accessors = AccessorRegistry::new();
        accessors.register_getter("getName", |tag: &Tag| tag.name.clone());
        accessors.register_getter("getName", |author: &Author| author.name.clone());

        DocumentMapper::new(Arc::new(metadata), Arc::new(accessors))
    }

    fn tags() -> Vec<EntityRef> {
        ["rust", "search", "solr"]
            .iter()
            .map(|name| {
                entity(Tag {
                    name: name.to_string(),
                })
            })
            .collect()
    }

    #[test]
    fn test_no_fields_yields_none() {
        let meta = MetaInformation::new("1", "book");
        assert!(mapper().map_to_document(&meta).unwrap().is_none());
    }

    #[test]
    fn test_scalar_fields_key_and_boost() {
        let meta = MetaInformation::new("book_1", "book")
            .with_boost(2.5)
            .with_field(FieldDescriptor::value("title", "Dune").with_alias("title_s").with_boost(3.0))
            .with_field(FieldDescriptor::value("pages", 412));

        let doc = mapper().map_to_document(&meta).unwrap().unwrap();
        assert_eq!(doc.key(), "book_1");
        assert_eq!(doc.boost(), 2.5);
        assert_eq!(doc.field_names(), vec!["title_s", "pages"]);
        assert_eq!(doc.field("title_s").map(|f| f.boost), Some(3.0));
        assert_eq!(doc.get_field("pages"), Some(&FieldValue::Integer(412)));
    }

    #[test]
    fn test_generated_keys_are_distinct_and_prefixed() {
        let meta = MetaInformation::new("ignored", "book")
            .generating_document_id(true)
            .with_field(FieldDescriptor::value("title", "Dune"));

        let mapper = mapper();
        let first = mapper.map_to_document(&meta).unwrap().unwrap();
        let second = mapper.map_to_document(&meta).unwrap().unwrap();

        assert!(first.key().starts_with("book_"));
        assert!(second.key().starts_with("book_"));
        assert_ne!(first.key(), second.key());
    }

    #[test]
    fn test_modifier_recorded_against_alias() {
        let meta = MetaInformation::new("1", "book").with_field(
            FieldDescriptor::value("tags", vec!["a", "b"])
                .with_alias("tags_ss")
                .with_modifier(FieldModifier::Add),
        );

        let doc = mapper().map_to_document(&meta).unwrap().unwrap();
        assert_eq!(
            doc.field("tags_ss").and_then(|f| f.modifier),
            Some(FieldModifier::Add)
        );
    }

    #[test]
    fn test_collection_with_getter_preserves_order() {
        let meta = MetaInformation::new("1", "book").with_field(
            FieldDescriptor::collection("tags", tags())
                .with_alias("tags_ss")
                .with_getter("getName"),
        );

        let doc = mapper().map_to_document(&meta).unwrap().unwrap();
        assert_eq!(
            doc.get_field("tags_ss"),
            Some(&FieldValue::from(vec!["rust", "search", "solr"]))
        );
    }

    #[test]
    fn test_collection_without_getter_flattens_elements() {
        let meta = MetaInformation::new("1", "book")
            .with_field(FieldDescriptor::collection("tags", tags()).with_alias("tags"));

        let doc = mapper().map_to_document(&meta).unwrap().unwrap();
        let list = doc.get_field("tags").and_then(|v| v.as_list()).unwrap();
        assert_eq!(list.len(), 3);

        let first = list[0].as_map().unwrap();
        assert_eq!(first.get("id"), Some(&FieldValue::from("tag_rust")));
        assert_eq!(first.get("name_s"), Some(&FieldValue::from("rust")));
    }

    #[test]
    fn test_object_with_getter() {
        let author = entity(Author {
            id: 1,
            name: "Frank Herbert".to_string(),
        });
        let meta = MetaInformation::new("1", "book").with_field(
            FieldDescriptor::object("author", author)
                .with_alias("author_s")
                .with_getter("getName"),
        );

        let doc = mapper().map_to_document(&meta).unwrap().unwrap();
        assert_eq!(
            doc.get_field("author_s"),
            Some(&FieldValue::from("Frank Herbert"))
        );
    }

    #[test]
    fn test_object_without_getter_flattens() {
        let author = entity(Author {
            id: 9,
            name: "Ursula".to_string(),
        });
        let meta = MetaInformation::new("1", "book")
            .with_field(FieldDescriptor::object("author", author));

        let doc = mapper().map_to_document(&meta).unwrap().unwrap();
        let map = doc.get_field("author").and_then(|v| v.as_map()).unwrap();
        assert_eq!(map.get("id"), Some(&FieldValue::from("author_9")));
        assert_eq!(map.get("name_s"), Some(&FieldValue::from("Ursula")));
    }

    #[test]
    fn test_getter_returning_object_is_mapping_error() {
        let mut accessors = AccessorRegistry::new();
        accessors.register_relation("getSelf", |tag: &Tag| {
            entity(Tag {
                name: tag.name.clone(),
            })
        });
        let mapper = DocumentMapper::new(Arc::new(MetadataRegistry::new()), Arc::new(accessors));

        let tag = entity(Tag {
            name: "rust".to_string(),
        });
        let meta = MetaInformation::new("1", "book")
            .with_field(FieldDescriptor::object("tag", tag).with_getter("getSelf"));

        match mapper.map_to_document(&meta) {
            Err(SolrmapError::Mapping(message)) => {
                assert!(message.contains("tag"));
                assert!(message.contains("getSelf"));
            }
            other => panic!("Expected mapping error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_getter_is_resolution_error() {
        let meta = MetaInformation::new("1", "book").with_field(
            FieldDescriptor::collection("tags", tags()).with_getter("getLabel('en')"),
        );

        assert!(matches!(
            mapper().map_to_document(&meta),
            Err(SolrmapError::Resolution(_))
        ));
    }

    #[test]
    fn test_unmapped_nested_type_is_metadata_error() {
        struct Publisher;

        let meta = MetaInformation::new("1", "book")
            .with_field(FieldDescriptor::object("publisher", entity(Publisher)));

        assert!(matches!(
            mapper().map_to_document(&meta),
            Err(SolrmapError::Metadata(_))
        ));
    }

    #[test]
    fn test_depth_guard() {
        let author = entity(Author {
            id: 1,
            name: "Ada".to_string(),
        });
        let meta = MetaInformation::new("1", "book")
            .with_field(FieldDescriptor::object("author", author));

        let mapper = mapper().with_config(MapperConfig {
            max_depth: 0,
            detect_cycles: true,
        });
        match mapper.map_to_document(&meta) {
            Err(SolrmapError::Mapping(message)) => assert!(message.contains("depth")),
            other => panic!("Expected mapping error, got {other:?}"),
        }
    }

    #[test]
    fn test_map_many_preserves_order() {
        let metas: Vec<MetaInformation> = (0..20)
            .map(|i| {
                MetaInformation::new(format!("book_{i}"), "book")
                    .with_field(FieldDescriptor::value("n", i))
            })
            .chain(std::iter::once(MetaInformation::new("empty", "book")))
            .collect();

        let docs = mapper().map_many(&metas).unwrap();
        assert_eq!(docs.len(), 21);
        assert_eq!(docs[5].as_ref().map(|d| d.key()), Some("book_5"));
        assert!(docs[20].is_none());
    }
}
