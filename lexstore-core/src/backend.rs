//! Storage backend abstraction for the document store.
//!
//! This module defines the core trait that abstracts over the hosted document
//! database, allowing the adapter to work with the Appwrite REST backend in
//! production and the in-memory backend in tests.
//!
//! # Overview
//!
//! The [`DocumentBackend`] trait offers two surfaces:
//!
//! - **Documents** - create, get, update and delete a single document, scoped to a
//!   collection of the backend's configured database
//! - **Provisioning** - list and create collections, list and create attributes
//!
//! Every method is one request/response exchange. Implementations must not retry.
//!
//! # Examples
//!
//! ```ignore
//! use lexstore_core::backend::DocumentBackend;
//! use serde_json::json;
//!
//! let id = DocumentId::unique();
//! let fields = json!({ "email": "test@example.com" }).as_object().cloned().unwrap();
//! let doc = backend.create_document("lawyers", &id, fields).await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{fmt::Debug, sync::Arc};

use crate::{
    document::{DocumentId, RawDocument},
    error::DocumentStoreResult,
};

/// A collection as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionInfo {
    #[serde(rename = "$id")]
    pub id: String,
    pub name: String,
}

/// The backend's own type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    String,
    Integer,
    #[serde(alias = "double")]
    Float,
    #[serde(other)]
    Other,
}

/// An attribute as reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeInfo {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: AttributeKind,
    #[serde(default)]
    pub required: bool,
    /// Present for string attributes.
    #[serde(default)]
    pub size: Option<usize>,
}

/// Parameters of a string attribute to create.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StringAttribute {
    pub key: String,
    pub size: usize,
    pub required: bool,
    pub default: Option<String>,
}

/// Parameters of an integer or float attribute to create.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericAttribute {
    pub key: String,
    pub required: bool,
    pub min: Option<Value>,
    pub max: Option<Value>,
    pub default: Option<Value>,
}

/// Abstract interface for a hosted document database.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; calls on different documents may run
/// concurrently. Concurrent writes to the same document are resolved by the backend.
///
/// # Error Handling
///
/// Addressing a document that does not exist must fail with
/// [`DocumentNotFound`](crate::error::DocumentStoreError::DocumentNotFound), an
/// unknown collection with
/// [`CollectionNotFound`](crate::error::DocumentStoreError::CollectionNotFound).
/// Every other rejection is passed through as
/// [`Backend`](crate::error::DocumentStoreError::Backend) with the backend's payload.
#[async_trait]
pub trait DocumentBackend: Send + Sync + Debug {
    /// Stores a new document under `id`, attaching `fields` as given.
    ///
    /// Fields are passed through unchanged; arrays must already be encoded. An id that is
    /// already taken in the collection is rejected.
    ///
    /// # Arguments
    ///
    /// * `collection` - The id of the collection to store into
    /// * `id` - The identifier of the new document
    /// * `fields` - The document's field values in storage form
    ///
    /// # Returns
    ///
    /// Returns the stored document as the backend echoes it, or a
    /// [`DocumentStoreError`](crate::error::DocumentStoreError) on failure.
    async fn create_document(
        &self,
        collection: &str,
        id: &DocumentId,
        fields: Map<String, Value>,
    ) -> DocumentStoreResult<RawDocument>;

    /// Fetches a document by exact identifier.
    ///
    /// # Arguments
    ///
    /// * `collection` - The id of the collection holding the document
    /// * `id` - The identifier of the document
    ///
    /// # Returns
    ///
    /// Returns the stored document, or a [`DocumentStoreError`](crate::error::DocumentStoreError)
    /// on failure. A missing document is
    /// [`DocumentNotFound`](crate::error::DocumentStoreError::DocumentNotFound).
    async fn get_document(&self, collection: &str, id: &DocumentId) -> DocumentStoreResult<RawDocument>;

    /// Merges `fields` into an existing document. Fields not named keep their values.
    ///
    /// A missing document is reported as not found before `fields` are checked against the
    /// collection's attributes.
    ///
    /// # Arguments
    ///
    /// * `collection` - The id of the collection holding the document
    /// * `id` - The identifier of the document to change
    /// * `fields` - The field values to overwrite, in storage form
    ///
    /// # Returns
    ///
    /// Returns the full document after the merge, or a
    /// [`DocumentStoreError`](crate::error::DocumentStoreError) on failure.
    async fn update_document(
        &self,
        collection: &str,
        id: &DocumentId,
        fields: Map<String, Value>,
    ) -> DocumentStoreResult<RawDocument>;

    /// Removes a document permanently.
    ///
    /// Deleting is not idempotent: a second delete of the same id fails as not found.
    ///
    /// # Arguments
    ///
    /// * `collection` - The id of the collection holding the document
    /// * `id` - The identifier of the document to remove
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` on success, or a [`DocumentStoreError`](crate::error::DocumentStoreError) on failure.
    async fn delete_document(&self, collection: &str, id: &DocumentId) -> DocumentStoreResult<()>;

    /// Lists the collections of the database.
    ///
    /// # Returns
    ///
    /// Returns every collection, following the backend's pages until none are left, or a
    /// [`DocumentStoreError`](crate::error::DocumentStoreError) on failure.
    async fn list_collections(&self) -> DocumentStoreResult<Vec<CollectionInfo>>;

    /// Creates an empty collection with the given id and display name.
    ///
    /// # Arguments
    ///
    /// * `id` - The collection id to request
    /// * `name` - The display name, which provisioning matches schemas against
    ///
    /// # Returns
    ///
    /// Returns the collection as created, or a
    /// [`DocumentStoreError`](crate::error::DocumentStoreError) on failure.
    async fn create_collection(&self, id: &str, name: &str) -> DocumentStoreResult<CollectionInfo>;

    /// Lists the attributes of a collection.
    ///
    /// # Arguments
    ///
    /// * `collection` - The id of the collection to inspect
    ///
    /// # Returns
    ///
    /// Returns every attribute across all pages, or a
    /// [`DocumentStoreError`](crate::error::DocumentStoreError) on failure.
    async fn list_attributes(&self, collection: &str) -> DocumentStoreResult<Vec<AttributeInfo>>;

    /// Adds a string attribute to a collection.
    ///
    /// # Arguments
    ///
    /// * `collection` - The id of the collection to extend
    /// * `attribute` - The key, maximum size, requiredness and default of the attribute
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` on success, or a [`DocumentStoreError`](crate::error::DocumentStoreError) on failure.
    async fn create_string_attribute(
        &self,
        collection: &str,
        attribute: StringAttribute,
    ) -> DocumentStoreResult<()>;

    /// Adds an integer attribute to a collection.
    ///
    /// # Arguments
    ///
    /// * `collection` - The id of the collection to extend
    /// * `attribute` - The key, bounds, requiredness and default of the attribute
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` on success, or a [`DocumentStoreError`](crate::error::DocumentStoreError) on failure.
    async fn create_integer_attribute(
        &self,
        collection: &str,
        attribute: NumericAttribute,
    ) -> DocumentStoreResult<()>;

    /// Adds a float attribute to a collection.
    ///
    /// # Arguments
    ///
    /// * `collection` - The id of the collection to extend
    /// * `attribute` - The key, bounds, requiredness and default of the attribute
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` on success, or a [`DocumentStoreError`](crate::error::DocumentStoreError) on failure.
    async fn create_float_attribute(
        &self,
        collection: &str,
        attribute: NumericAttribute,
    ) -> DocumentStoreResult<()>;
}

#[async_trait]
impl<B> DocumentBackend for &B
where
    B: DocumentBackend + ?Sized,
{
    async fn create_document(
        &self,
        collection: &str,
        id: &DocumentId,
        fields: Map<String, Value>,
    ) -> DocumentStoreResult<RawDocument> {
        (**self).create_document(collection, id, fields).await
    }

    async fn get_document(&self, collection: &str, id: &DocumentId) -> DocumentStoreResult<RawDocument> {
        (**self).get_document(collection, id).await
    }

    async fn update_document(
        &self,
        collection: &str,
        id: &DocumentId,
        fields: Map<String, Value>,
    ) -> DocumentStoreResult<RawDocument> {
        (**self).update_document(collection, id, fields).await
    }

    async fn delete_document(&self, collection: &str, id: &DocumentId) -> DocumentStoreResult<()> {
        (**self).delete_document(collection, id).await
    }

    async fn list_collections(&self) -> DocumentStoreResult<Vec<CollectionInfo>> {
        (**self).list_collections().await
    }

    async fn create_collection(&self, id: &str, name: &str) -> DocumentStoreResult<CollectionInfo> {
        (**self).create_collection(id, name).await
    }

    async fn list_attributes(&self, collection: &str) -> DocumentStoreResult<Vec<AttributeInfo>> {
        (**self).list_attributes(collection).await
    }

    async fn create_string_attribute(
        &self,
        collection: &str,
        attribute: StringAttribute,
    ) -> DocumentStoreResult<()> {
        (**self).create_string_attribute(collection, attribute).await
    }

    async fn create_integer_attribute(
        &self,
        collection: &str,
        attribute: NumericAttribute,
    ) -> DocumentStoreResult<()> {
        (**self).create_integer_attribute(collection, attribute).await
    }

    async fn create_float_attribute(
        &self,
        collection: &str,
        attribute: NumericAttribute,
    ) -> DocumentStoreResult<()> {
        (**self).create_float_attribute(collection, attribute).await
    }
}

#[async_trait]
impl<B> DocumentBackend for Arc<B>
where
    B: DocumentBackend + ?Sized,
{
    async fn create_document(
        &self,
        collection: &str,
        id: &DocumentId,
        fields: Map<String, Value>,
    ) -> DocumentStoreResult<RawDocument> {
        (**self).create_document(collection, id, fields).await
    }

    async fn get_document(&self, collection: &str, id: &DocumentId) -> DocumentStoreResult<RawDocument> {
        (**self).get_document(collection, id).await
    }

    async fn update_document(
        &self,
        collection: &str,
        id: &DocumentId,
        fields: Map<String, Value>,
    ) -> DocumentStoreResult<RawDocument> {
        (**self).update_document(collection, id, fields).await
    }

    async fn delete_document(&self, collection: &str, id: &DocumentId) -> DocumentStoreResult<()> {
        (**self).delete_document(collection, id).await
    }

    async fn list_collections(&self) -> DocumentStoreResult<Vec<CollectionInfo>> {
        (**self).list_collections().await
    }

    async fn create_collection(&self, id: &str, name: &str) -> DocumentStoreResult<CollectionInfo> {
        (**self).create_collection(id, name).await
    }

    async fn list_attributes(&self, collection: &str) -> DocumentStoreResult<Vec<AttributeInfo>> {
        (**self).list_attributes(collection).await
    }

    async fn create_string_attribute(
        &self,
        collection: &str,
        attribute: StringAttribute,
    ) -> DocumentStoreResult<()> {
        (**self).create_string_attribute(collection, attribute).await
    }

    async fn create_integer_attribute(
        &self,
        collection: &str,
        attribute: NumericAttribute,
    ) -> DocumentStoreResult<()> {
        (**self).create_integer_attribute(collection, attribute).await
    }

    async fn create_float_attribute(
        &self,
        collection: &str,
        attribute: NumericAttribute,
    ) -> DocumentStoreResult<()> {
        (**self).create_float_attribute(collection, attribute).await
    }
}

/// Factory trait for creating backend instances.
#[async_trait]
pub trait BackendBuilder {
    type Backend: DocumentBackend;

    async fn build(self) -> DocumentStoreResult<Self::Backend>;
}
