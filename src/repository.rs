//! Find operations for one entity type.

use crate::client::SolrClient;
use crate::error::Result;
use crate::mapping::entity::EntityRef;
use crate::transport::SearchRequest;

/// Finds entities of the same type as a prototype entity.
pub struct Repository<'a> {
    client: &'a SolrClient,
    prototype: EntityRef,
}

impl<'a> Repository<'a> {
    pub fn new(client: &'a SolrClient, prototype: EntityRef) -> Self {
        Repository { client, prototype }
    }

    fn document_name(&self) -> Result<String> {
        let meta = self
            .client
            .mapper()
            .metadata()
            .load_information(self.prototype.as_ref())?;
        Ok(meta.document_name().to_string())
    }

    /// Find the entity stored under `key`.
    pub fn find(&self, key: &str) -> Result<Option<EntityRef>> {
        let request = SearchRequest::Identifier {
            document_name: self.document_name()?,
            key: key.to_string(),
        };
        Ok(self.client.query(&request)?.pop())
    }

    /// Find every entity of this type.
    pub fn find_all(&self) -> Result<Vec<EntityRef>> {
        let request = SearchRequest::DocumentName {
            document_name: self.document_name()?,
        };
        self.client.query(&request)
    }

    /// Find entities matching every `(logical field, term)` pair.
    ///
    /// Fields the entity does not map are ignored.
    pub fn find_by(&self, criteria: &[(&str, &str)]) -> Result<Vec<EntityRef>> {
        let mut query = self.client.create_query(self.prototype.as_ref())?;
        for (field, term) in criteria {
            query.add_search_term(field, *term);
        }

        let request = SearchRequest::Mapped {
            document_name: self.document_name()?,
            query,
        };
        self.client.query(&request)
    }

    /// Like [`Repository::find_by`], returning the last match.
    pub fn find_one_by(&self, criteria: &[(&str, &str)]) -> Result<Option<EntityRef>> {
        Ok(self.find_by(criteria)?.pop())
    }
}
