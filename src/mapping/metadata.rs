//! Metadata providers.
//!
//! The mapper never inspects entities itself: it asks a
//! [`MetadataProvider`] for the [`MetaInformation`] of each entity it meets,
//! including nested related objects. [`MetadataRegistry`] is a provider
//! backed by per-type closures registered at configuration time.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use ahash::AHashMap;

use crate::error::{Result, SolrmapError};
use crate::mapping::entity::Entity;
use crate::mapping::meta::MetaInformation;

/// Produces mapping metadata for entities.
///
/// Implementations must be safe for concurrent read-only use.
pub trait MetadataProvider: Send + Sync {
    /// Load the metadata of `entity`.
    ///
    /// Fails with [`SolrmapError::Metadata`] if the entity type is unmapped.
    fn load_information(&self, entity: &dyn Entity) -> Result<MetaInformation>;
}

type Loader = Arc<dyn Fn(&dyn Any) -> Option<MetaInformation> + Send + Sync>;

/// A [`MetadataProvider`] backed by closures registered per entity type.
#[derive(Clone, Default)]
pub struct MetadataRegistry {
    loaders: AHashMap<TypeId, Loader>,
}

impl fmt::Debug for MetadataRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetadataRegistry")
            .field("types", &self.loaders.len())
            .finish()
    }
}

impl MetadataRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the metadata loader for entities of type `T`.
    pub fn register<T, F>(&mut self, loader: F) -> &mut Self
    where
        T: Any,
        F: Fn(&T) -> MetaInformation + Send + Sync + 'static,
    {
        let wrapped: Loader =
            Arc::new(move |target: &dyn Any| target.downcast_ref::<T>().map(&loader));
        self.loaders.insert(TypeId::of::<T>(), wrapped);
        self
    }

    /// Check whether `T` has a registered loader.
    pub fn is_mapped<T: Any>(&self) -> bool {
        self.loaders.contains_key(&TypeId::of::<T>())
    }
}

impl MetadataProvider for MetadataRegistry {
    fn load_information(&self, entity: &dyn Entity) -> Result<MetaInformation> {
        let target = entity.as_any();
        self.loaders
            .get(&target.type_id())
            .and_then(|loader| loader(target))
            .ok_or_else(|| {
                SolrmapError::metadata(format!(
                    "entity type `{}` has no field mapping",
                    entity.entity_type()
                ))
            })
    }
}

impl<P: MetadataProvider + ?Sized> MetadataProvider for Arc<P> {
    fn load_information(&self, entity: &dyn Entity) -> Result<MetaInformation> {
        (**self).load_information(entity)
    }
}
