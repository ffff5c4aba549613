//! In-memory storage implementation of the document backend.
//!
//! Documents are kept as JSON field maps in HashMaps behind async-aware read-write
//! locks, indexed by collection id and document id.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mea::rwlock::RwLock;
use serde_json::{Map, Value};
use std::{collections::HashMap, sync::Arc};

use lexstore_core::{
    backend::{
        AttributeInfo, AttributeKind, BackendBuilder, CollectionInfo, DocumentBackend,
        NumericAttribute, StringAttribute,
    },
    document::{DocumentId, DocumentMeta, RawDocument},
    error::{DocumentStoreError, DocumentStoreResult},
};

/// Database id reported in document metadata unless the builder sets another.
pub const DEFAULT_DATABASE_ID: &str = "memory";

#[derive(Debug, Clone)]
struct StoredDocument {
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    fields: Map<String, Value>,
}

#[derive(Debug, Clone)]
struct StoredAttribute {
    info: AttributeInfo,
    default: Option<Value>,
}

#[derive(Debug)]
struct CollectionState {
    info: CollectionInfo,
    attributes: Vec<StoredAttribute>,
    documents: HashMap<String, StoredDocument>,
}

impl CollectionState {
    fn new(id: &str, name: &str) -> Self {
        Self {
            info: CollectionInfo { id: id.to_string(), name: name.to_string() },
            attributes: Vec::new(),
            documents: HashMap::new(),
        }
    }

    /// Rejects keys without an attribute and values that do not fit their attribute.
    ///
    /// Collections without attributes accept any field.
    fn validate(&self, fields: &Map<String, Value>) -> DocumentStoreResult<()> {
        if self.attributes.is_empty() {
            return Ok(());
        }

        for (key, value) in fields {
            let Some(attribute) = self.attributes.iter().map(|a| &a.info).find(|a| &a.key == key) else {
                return Err(invalid_structure(format!("Unknown attribute: \"{key}\"")));
            };

            let fits = match (attribute.kind, value) {
                (_, Value::Null) => true,
                (AttributeKind::String, Value::String(s)) => attribute
                    .size
                    .is_none_or(|size| s.chars().count() <= size),
                (AttributeKind::Integer, Value::Number(n)) => n.is_i64(),
                (AttributeKind::Float, Value::Number(_)) => true,
                _ => false,
            };

            if !fits {
                return Err(invalid_structure(format!(
                    "Attribute \"{key}\" has invalid type or size"
                )));
            }
        }

        Ok(())
    }

    /// Fills in the defaults of attributes that `fields` does not set.
    fn apply_defaults(&self, fields: &mut Map<String, Value>) {
        for attribute in &self.attributes {
            if let Some(default) = &attribute.default {
                fields
                    .entry(attribute.info.key.clone())
                    .or_insert_with(|| default.clone());
            }
        }
    }

    fn attribute(&mut self, attribute: AttributeInfo, default: Option<Value>) -> DocumentStoreResult<()> {
        if self.attributes.iter().any(|a| a.info.key == attribute.key) {
            return Err(DocumentStoreError::Backend {
                status: Some(409),
                kind: Some("attribute_already_exists".into()),
                message: format!("Attribute with the requested key \"{}\" already exists.", attribute.key),
            });
        }

        self.attributes.push(StoredAttribute { info: attribute, default });

        Ok(())
    }
}

fn invalid_structure(detail: String) -> DocumentStoreError {
    DocumentStoreError::Backend {
        status: Some(400),
        kind: Some("document_invalid_structure".into()),
        message: format!("Invalid document structure: {detail}"),
    }
}

type StoreMap = HashMap<String, CollectionState>;

/// Thread-safe in-memory document backend.
///
/// `InMemoryBackend` is cloneable and uses an `Arc`-wrapped internal state, allowing
/// it to be shared across async tasks. Clones share the same underlying data.
#[derive(Clone, Debug)]
pub struct InMemoryBackend {
    database_id: String,
    store: Arc<RwLock<StoreMap>>,
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryBackend {
    /// Creates a new backend with no collections.
    pub fn new() -> Self {
        Self {
            database_id: DEFAULT_DATABASE_ID.to_string(),
            store: Arc::new(RwLock::new(StoreMap::new())),
        }
    }

    /// Creates a builder for constructing an `InMemoryBackend` with seeded collections.
    pub fn builder() -> InMemoryBackendBuilder {
        InMemoryBackendBuilder::default()
    }

    /// Number of documents currently held in `collection`.
    pub async fn document_count(&self, collection: &str) -> usize {
        self.store
            .read()
            .await
            .get(collection)
            .map_or(0, |c| c.documents.len())
    }

    fn to_raw(&self, collection: &str, id: &str, doc: &StoredDocument) -> RawDocument {
        RawDocument {
            meta: DocumentMeta {
                id: id.into(),
                collection_id: collection.to_string(),
                database_id: self.database_id.clone(),
                created_at: Some(doc.created_at),
                updated_at: Some(doc.updated_at),
                permissions: Vec::new(),
            },
            fields: doc.fields.clone(),
        }
    }
}

#[async_trait]
impl DocumentBackend for InMemoryBackend {
    async fn create_document(
        &self,
        collection: &str,
        id: &DocumentId,
        mut fields: Map<String, Value>,
    ) -> DocumentStoreResult<RawDocument> {
        let mut store = self.store.write().await;
        let state = store
            .get_mut(collection)
            .ok_or_else(|| DocumentStoreError::CollectionNotFound(collection.to_string()))?;

        if state.documents.contains_key(id.as_str()) {
            return Err(DocumentStoreError::DocumentAlreadyExists(
                id.to_string(),
                collection.to_string(),
            ));
        }

        state.validate(&fields)?;
        state.apply_defaults(&mut fields);

        let now = Utc::now();
        let doc = StoredDocument { created_at: now, updated_at: now, fields };
        let raw = self.to_raw(collection, id.as_str(), &doc);
        state.documents.insert(id.to_string(), doc);

        Ok(raw)
    }

    async fn get_document(&self, collection: &str, id: &DocumentId) -> DocumentStoreResult<RawDocument> {
        let store = self.store.read().await;
        let state = store
            .get(collection)
            .ok_or_else(|| DocumentStoreError::CollectionNotFound(collection.to_string()))?;

        state
            .documents
            .get(id.as_str())
            .map(|doc| self.to_raw(collection, id.as_str(), doc))
            .ok_or_else(|| DocumentStoreError::DocumentNotFound(id.to_string(), collection.to_string()))
    }

    async fn update_document(
        &self,
        collection: &str,
        id: &DocumentId,
        fields: Map<String, Value>,
    ) -> DocumentStoreResult<RawDocument> {
        let mut store = self.store.write().await;
        let state = store
            .get_mut(collection)
            .ok_or_else(|| DocumentStoreError::CollectionNotFound(collection.to_string()))?;

        if !state.documents.contains_key(id.as_str()) {
            return Err(DocumentStoreError::DocumentNotFound(id.to_string(), collection.to_string()));
        }

        state.validate(&fields)?;

        let doc = state
            .documents
            .get_mut(id.as_str())
            .ok_or_else(|| DocumentStoreError::DocumentNotFound(id.to_string(), collection.to_string()))?;

        doc.fields.extend(fields);
        doc.updated_at = Utc::now();

        let doc = doc.clone();

        Ok(self.to_raw(collection, id.as_str(), &doc))
    }

    async fn delete_document(&self, collection: &str, id: &DocumentId) -> DocumentStoreResult<()> {
        let mut store = self.store.write().await;
        let state = store
            .get_mut(collection)
            .ok_or_else(|| DocumentStoreError::CollectionNotFound(collection.to_string()))?;

        if state.documents.remove(id.as_str()).is_none() {
            return Err(DocumentStoreError::DocumentNotFound(id.to_string(), collection.to_string()));
        }

        Ok(())
    }

    async fn list_collections(&self) -> DocumentStoreResult<Vec<CollectionInfo>> {
        let mut collections: Vec<CollectionInfo> = self
            .store
            .read()
            .await
            .values()
            .map(|c| c.info.clone())
            .collect();
        collections.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(collections)
    }

    async fn create_collection(&self, id: &str, name: &str) -> DocumentStoreResult<CollectionInfo> {
        let mut store = self.store.write().await;

        if store.contains_key(id) {
            return Err(DocumentStoreError::Backend {
                status: Some(409),
                kind: Some("collection_already_exists".into()),
                message: format!("Collection with the requested ID \"{id}\" already exists."),
            });
        }

        let state = CollectionState::new(id, name);
        let info = state.info.clone();
        store.insert(id.to_string(), state);

        Ok(info)
    }

    async fn list_attributes(&self, collection: &str) -> DocumentStoreResult<Vec<AttributeInfo>> {
        self.store
            .read()
            .await
            .get(collection)
            .map(|c| c.attributes.iter().map(|a| a.info.clone()).collect())
            .ok_or_else(|| DocumentStoreError::CollectionNotFound(collection.to_string()))
    }

    async fn create_string_attribute(
        &self,
        collection: &str,
        attribute: StringAttribute,
    ) -> DocumentStoreResult<()> {
        let mut store = self.store.write().await;
        let state = store
            .get_mut(collection)
            .ok_or_else(|| DocumentStoreError::CollectionNotFound(collection.to_string()))?;

        state.attribute(AttributeInfo {
            key: attribute.key,
            kind: AttributeKind::String,
            required: attribute.required,
            size: Some(attribute.size),
        }, attribute.default.map(Value::String))
    }

    async fn create_integer_attribute(
        &self,
        collection: &str,
        attribute: NumericAttribute,
    ) -> DocumentStoreResult<()> {
        let mut store = self.store.write().await;
        let state = store
            .get_mut(collection)
            .ok_or_else(|| DocumentStoreError::CollectionNotFound(collection.to_string()))?;

        state.attribute(AttributeInfo {
            key: attribute.key,
            kind: AttributeKind::Integer,
            required: attribute.required,
            size: None,
        }, attribute.default)
    }

    async fn create_float_attribute(
        &self,
        collection: &str,
        attribute: NumericAttribute,
    ) -> DocumentStoreResult<()> {
        let mut store = self.store.write().await;
        let state = store
            .get_mut(collection)
            .ok_or_else(|| DocumentStoreError::CollectionNotFound(collection.to_string()))?;

        state.attribute(AttributeInfo {
            key: attribute.key,
            kind: AttributeKind::Float,
            required: attribute.required,
            size: None,
        }, attribute.default)
    }
}

/// Builder for constructing [`InMemoryBackend`] instances.
#[derive(Debug, Default)]
pub struct InMemoryBackendBuilder {
    database_id: Option<String>,
    collections: Vec<(String, String)>,
}

impl InMemoryBackendBuilder {
    /// Sets the database id reported in document metadata.
    pub fn database_id(mut self, database_id: impl Into<String>) -> Self {
        self.database_id = Some(database_id.into());
        self
    }

    /// Seeds an empty collection without attributes.
    pub fn with_collection(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.collections.push((id.into(), name.into()));
        self
    }
}

#[async_trait]
impl BackendBuilder for InMemoryBackendBuilder {
    type Backend = InMemoryBackend;

    async fn build(self) -> DocumentStoreResult<Self::Backend> {
        let mut backend = InMemoryBackend::new();

        if let Some(database_id) = self.database_id {
            backend.database_id = database_id;
        }

        for (id, name) in self.collections {
            backend.create_collection(&id, &name).await?;
        }

        Ok(backend)
    }
}
