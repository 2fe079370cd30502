//! Entity capability trait.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// An arbitrary domain object that can be mapped onto a document.
///
/// Implemented for every `'static + Send + Sync` type. The mapping engine
/// only needs type identity (for metadata and accessor lookup) and a
/// readable type name for diagnostics.
pub trait Entity: Any + Send + Sync {
    /// Access the concrete value for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Readable type name used in error messages.
    fn entity_type(&self) -> &'static str;
}

impl<T: Any + Send + Sync> Entity for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn entity_type(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

impl fmt::Debug for dyn Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("type", &self.entity_type())
            .finish()
    }
}

/// Shared handle to an entity in an object graph.
///
/// Pass `handle.as_ref()` where a `&dyn Entity` is expected; the handle
/// itself is also an `Entity` (of type `Arc<..>`).
pub type EntityRef = Arc<dyn Entity>;

/// Wrap a value as an [`EntityRef`].
pub fn entity<T: Any + Send + Sync>(value: T) -> EntityRef {
    Arc::new(value)
}

/// Address of the entity behind a handle, used to detect reference cycles.
pub(crate) fn entity_address(entity: &EntityRef) -> usize {
    Arc::as_ptr(entity) as *const () as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Book {
        title: String,
    }

    #[test]
    fn test_downcast_through_handle() {
        let handle = entity(Book {
            title: "Dune".to_string(),
        });

        let book = handle.as_ref().as_any().downcast_ref::<Book>();
        assert_eq!(book.map(|b| b.title.as_str()), Some("Dune"));
        assert!(handle.as_ref().entity_type().ends_with("Book"));
    }

    #[test]
    fn test_entity_address_is_stable() {
        let handle = entity(Book {
            title: "Dune".to_string(),
        });
        let clone = Arc::clone(&handle);

        assert_eq!(entity_address(&handle), entity_address(&clone));
    }
}
