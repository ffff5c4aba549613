//! Collection handles: the CRUD adapter.
//!
//! This module provides the four document operations scoped to one collection.
//!
//! # Collection Types
//!
//! - [`Collection`] - Untyped collection keyed by a collection id, working on field maps.
//!   When bound to a [`Schema`] it encodes and decodes array fields.
//! - [`TypedCollection`] - Type-safe collection for a [`Record`] type. The record type pins
//!   both the schema and the collection id.
//!
//! Every operation logs its failure and returns the error unchanged. Logging
//! successful calls is left to the caller.
//!
//! # Example
//!
//! ```ignore
//! let lawyers = store.typed_collection::<LawyerProfile>()?;
//! let stored = lawyers.create(profile).await?;
//! let patch = Patch::new().set("phone", "9876543210")?;
//! let updated = lawyers.update(stored.id(), patch).await?;
//! lawyers.delete(updated.id()).await?;
//! ```

use serde_json::{Map, Value};
use std::marker::PhantomData;

use crate::{
    backend::DocumentBackend,
    codec::FieldCodec,
    document::{DeleteConfirmation, DocumentId, RawDocument, Record, RecordExt, Stored},
    error::DocumentStoreResult,
    patch::Patch,
    schema::Schema,
};

/// Logs a failed adapter call and hands the result back untouched.
fn logged<T>(
    result: DocumentStoreResult<T>,
    operation: &'static str,
    collection: &str,
    document: Option<&DocumentId>,
) -> DocumentStoreResult<T> {
    if let Err(err) = &result {
        tracing::error!(
            operation,
            collection,
            document = document.map(DocumentId::as_str),
            error = %err,
            "document operation failed"
        );
    }

    result
}

/// An untyped collection with a reference to a storage backend.
///
/// All documents are represented as JSON field maps. Without a schema the fields are
/// attached as-is, so array fields must already be encoded by the caller.
///
/// # Type Parameters
///
/// * `'a` - Lifetime of the backend reference
/// * `B` - The storage backend type
#[derive(Debug)]
pub struct Collection<'a, B: DocumentBackend> {
    id: String,
    schema: Option<&'static Schema>,
    backend: &'a B,
}

impl<'a, B: DocumentBackend> Collection<'a, B> {
    pub(crate) fn new(id: String, schema: Option<&'static Schema>, backend: &'a B) -> Self {
        Self { id, schema, backend }
    }

    /// Returns the backend id of this collection.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the schema used for field encoding, if any.
    pub fn schema(&self) -> Option<&'static Schema> {
        self.schema
    }

    /// Binds a schema, turning on array encoding for its array fields.
    pub fn with_schema(self, schema: &'static Schema) -> Self {
        Self { schema: Some(schema), ..self }
    }

    fn encode(&self, fields: Map<String, Value>) -> DocumentStoreResult<Map<String, Value>> {
        match self.schema {
            Some(schema) => FieldCodec::new(schema).encode(fields),
            None => Ok(fields),
        }
    }

    fn decode(&self, mut document: RawDocument) -> DocumentStoreResult<RawDocument> {
        if let Some(schema) = self.schema {
            document.fields = FieldCodec::new(schema).decode(document.fields)?;
        }

        Ok(document)
    }

    /// Creates a document under a freshly generated id.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentStoreError`](crate::error::DocumentStoreError) if encoding fails
    /// or the backend rejects the document.
    pub async fn create(&self, fields: Map<String, Value>) -> DocumentStoreResult<RawDocument> {
        let id = DocumentId::unique();
        let result = async {
            let fields = self.encode(fields)?;
            let created = self.backend.create_document(&self.id, &id, fields).await?;
            self.decode(created)
        }
        .await;

        logged(result, "create", &self.id, Some(&id))
    }

    /// Reads a document by id.
    ///
    /// # Errors
    ///
    /// Fails with [`DocumentNotFound`](crate::error::DocumentStoreError::DocumentNotFound)
    /// if no such document exists.
    pub async fn read(&self, id: impl Into<DocumentId>) -> DocumentStoreResult<RawDocument> {
        let id = id.into();
        let result = async {
            let document = self.backend.get_document(&self.id, &id).await?;
            self.decode(document)
        }
        .await;

        logged(result, "read", &self.id, Some(&id))
    }

    /// Merges `fields` into an existing document and returns the updated document.
    ///
    /// # Errors
    ///
    /// Fails with [`DocumentNotFound`](crate::error::DocumentStoreError::DocumentNotFound)
    /// if no such document exists.
    pub async fn update(
        &self,
        id: impl Into<DocumentId>,
        fields: Map<String, Value>,
    ) -> DocumentStoreResult<RawDocument> {
        let id = id.into();
        let result = async {
            let fields = self.encode(fields)?;
            let updated = self.backend.update_document(&self.id, &id, fields).await?;
            self.decode(updated)
        }
        .await;

        logged(result, "update", &self.id, Some(&id))
    }

    /// Deletes a document permanently.
    ///
    /// # Errors
    ///
    /// Fails with [`DocumentNotFound`](crate::error::DocumentStoreError::DocumentNotFound)
    /// if no such document exists.
    pub async fn delete(&self, id: impl Into<DocumentId>) -> DocumentStoreResult<DeleteConfirmation> {
        let id = id.into();
        let result = self
            .backend
            .delete_document(&self.id, &id)
            .await
            .map(|()| DeleteConfirmation {
                collection_id: self.id.clone(),
                document_id: id.clone(),
            });

        logged(result, "delete", &self.id, Some(&id))
    }
}

/// A collection whose documents are records of type `R`.
#[derive(Debug)]
pub struct TypedCollection<'a, B: DocumentBackend, R: Record> {
    inner: Collection<'a, B>,
    _marker: PhantomData<R>,
}

impl<'a, B: DocumentBackend, R: Record> TypedCollection<'a, B, R> {
    pub(crate) fn new(id: String, backend: &'a B) -> Self {
        Self {
            inner: Collection::new(id, Some(R::schema()), backend),
            _marker: PhantomData,
        }
    }

    /// Returns the backend id of this collection.
    pub fn id(&self) -> &str {
        self.inner.id()
    }

    /// Returns the untyped view of this collection, still bound to `R`'s schema.
    pub fn untyped(&self) -> &Collection<'a, B> {
        &self.inner
    }

    fn typed(document: RawDocument) -> DocumentStoreResult<Stored<R>> {
        Ok(Stored {
            meta: document.meta,
            record: R::from_fields(document.fields)?,
        })
    }

    /// Creates a document holding `record`.
    pub async fn create(&self, record: R) -> DocumentStoreResult<Stored<R>> {
        let fields = logged(record.to_fields(), "create", self.id(), None)?;
        let document = self.inner.create(fields).await?;

        logged(Self::typed(document), "create", self.id(), None)
    }

    /// Reads the record stored under `id`.
    pub async fn read(&self, id: impl Into<DocumentId>) -> DocumentStoreResult<Stored<R>> {
        let id = id.into();
        let document = self.inner.read(&id).await?;

        logged(Self::typed(document), "read", self.id(), Some(&id))
    }

    /// Applies `patch` to the record stored under `id`.
    pub async fn update(&self, id: impl Into<DocumentId>, patch: Patch<R>) -> DocumentStoreResult<Stored<R>> {
        let id = id.into();
        let document = self.inner.update(&id, patch.into_fields()).await?;

        logged(Self::typed(document), "update", self.id(), Some(&id))
    }

    /// Replaces every field of the record stored under `id` with the values of `record`.
    ///
    /// Schema fields that `record` leaves unset are written as null.
    pub async fn replace(&self, id: impl Into<DocumentId>, record: R) -> DocumentStoreResult<Stored<R>> {
        let id = id.into();
        let mut fields = logged(record.to_fields(), "replace", self.id(), Some(&id))?;

        // Unset optionals are skipped by serialization.
        for def in R::schema().fields {
            fields.entry(def.name).or_insert(Value::Null);
        }

        let document = self.inner.update(&id, fields).await?;

        logged(Self::typed(document), "replace", self.id(), Some(&id))
    }

    /// Deletes the document stored under `id`.
    pub async fn delete(&self, id: impl Into<DocumentId>) -> DocumentStoreResult<DeleteConfirmation> {
        self.inner.delete(id).await
    }
}
