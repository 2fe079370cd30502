//! Client facade tying mapping, queries and the transport together.

use std::sync::Arc;

use log::{debug, warn};

use crate::config::{QueryDefaults, SolrmapConfig};
use crate::error::Result;
use crate::mapping::accessor::AccessorRegistry;
use crate::mapping::entity::{Entity, EntityRef};
use crate::mapping::mapper::DocumentMapper;
use crate::mapping::metadata::MetadataProvider;
use crate::query::mapped::FieldMappedQuery;
use crate::repository::Repository;
use crate::transport::{SearchRequest, Transport};

/// Entry point for indexing entities and querying them back.
#[derive(Clone)]
pub struct SolrClient {
    transport: Arc<dyn Transport>,
    mapper: DocumentMapper,
    query_defaults: QueryDefaults,
}

impl SolrClient {
    /// Create a client from a transport and a mapper.
    pub fn new(transport: Arc<dyn Transport>, mapper: DocumentMapper) -> Self {
        SolrClient {
            transport,
            mapper,
            query_defaults: QueryDefaults::default(),
        }
    }

    /// Create a client whose mapper and query defaults come from `config`.
    pub fn from_config(
        transport: Arc<dyn Transport>,
        metadata: Arc<dyn MetadataProvider>,
        accessors: Arc<AccessorRegistry>,
        config: &SolrmapConfig,
    ) -> Self {
        let mapper = DocumentMapper::new(metadata, accessors).with_config(config.mapper.clone());
        Self::new(transport, mapper).with_query_defaults(config.query.clone())
    }

    /// Set the flags applied to queries from [`SolrClient::create_query`].
    pub fn with_query_defaults(mut self, defaults: QueryDefaults) -> Self {
        self.query_defaults = defaults;
        self
    }

    pub fn mapper(&self) -> &DocumentMapper {
        &self.mapper
    }

    /// Map `entity` and send it to the index.
    ///
    /// Returns `false` without contacting the transport when the entity
    /// has no mapped fields.
    pub fn add_document(&self, entity: &dyn Entity) -> Result<bool> {
        match self.mapper.map_entity(entity)? {
            Some(document) => {
                self.transport.send(&document)?;
                debug!("sent document `{}`", document.key());
                Ok(true)
            }
            None => {
                warn!(
                    "entity `{}` has no mapped fields, nothing to index",
                    entity.entity_type()
                );
                Ok(false)
            }
        }
    }

    /// Create an empty query over the mapped fields of `entity`.
    pub fn create_query(&self, entity: &dyn Entity) -> Result<FieldMappedQuery> {
        let meta = self.mapper.metadata().load_information(entity)?;
        Ok(FieldMappedQuery::new(meta.alias_table()).with_defaults(&self.query_defaults))
    }

    /// Execute a search request.
    pub fn query(&self, request: &SearchRequest) -> Result<Vec<EntityRef>> {
        if let SearchRequest::Mapped { query, .. } = request {
            debug!("query `{}` on `{}`", query, request.document_name());
        }
        self.transport.search(request)
    }

    /// Remove every document from the index.
    pub fn clear_index(&self) -> Result<()> {
        self.transport.clear_index()
    }

    /// Repository for entities shaped like `prototype`.
    pub fn repository(&self, prototype: EntityRef) -> Repository<'_> {
        Repository::new(self, prototype)
    }
}
