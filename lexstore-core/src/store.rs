//! Main document store interface.
//!
//! [`DocumentStore`] owns a backend and the collection id mapping, and hands out
//! collection handles borrowing both. Nothing here is global: a store is built once
//! at startup and passed by reference to whoever needs it.
//!
//! # Example
//!
//! ```ignore
//! use lexstore_core::{config::CollectionIds, store::DocumentStore};
//!
//! let store = DocumentStore::new(backend, CollectionIds::new().with("Case", "cases"));
//! let cases = store.typed_collection::<Case>()?;
//! let raw = store.collection("cases");
//! ```

use crate::{
    backend::DocumentBackend,
    collection::{Collection, TypedCollection},
    config::CollectionIds,
    document::Record,
    error::DocumentStoreResult,
    schema::Schema,
};

/// A document store bound to a specific backend implementation.
///
/// # Type Parameters
///
/// * `B` - The backend implementation type
#[derive(Debug)]
pub struct DocumentStore<B: DocumentBackend> {
    backend: B,
    collections: CollectionIds,
}

impl<B: DocumentBackend> DocumentStore<B> {
    /// Creates a new document store with the given backend and collection ids.
    pub fn new(backend: B, collections: CollectionIds) -> Self {
        Self { backend, collections }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn collection_ids(&self) -> &CollectionIds {
        &self.collections
    }

    /// Gets a typed collection for the specified record type.
    ///
    /// The collection id is looked up by the record's schema name.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no collection id is configured for the schema.
    pub fn typed_collection<R: Record>(&self) -> DocumentStoreResult<TypedCollection<'_, B, R>> {
        let id = self.collections.resolve(R::schema().name)?;

        Ok(TypedCollection::new(id.to_string(), &self.backend))
    }

    /// Gets an untyped collection with the given backend id.
    ///
    /// Fields pass through without encoding.
    pub fn collection(&self, id: &str) -> Collection<'_, B> {
        Collection::new(id.to_string(), None, &self.backend)
    }

    /// Gets an untyped collection for `schema`, with array encoding enabled.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no collection id is configured for the schema.
    pub fn schema_collection(&self, schema: &'static Schema) -> DocumentStoreResult<Collection<'_, B>> {
        let id = self.collections.resolve(schema.name)?;

        Ok(Collection::new(id.to_string(), Some(schema), &self.backend))
    }

    /// Consumes the store and returns its backend.
    pub fn into_backend(self) -> B {
        self.backend
    }
}
