//! Core traits and types for document representation.
//!
//! A document crosses the adapter boundary in two shapes:
//!
//! - [`RawDocument`] - metadata plus an untyped field map, as exchanged with a backend
//! - [`Stored<R>`] - metadata plus a typed [`Record`], as handed to application code

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{fmt, ops::Deref};
use uuid::Uuid;

use crate::{error::DocumentStoreResult, schema::Schema};

/// Identifier of a document within a collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Generates a fresh identifier.
    ///
    /// The identifier is a 32 character lowercase hex string, which satisfies the
    /// backend's id rules (at most 36 characters, alphanumeric first character).
    pub fn unique() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for DocumentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for DocumentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<&DocumentId> for DocumentId {
    fn from(value: &DocumentId) -> Self {
        value.clone()
    }
}

/// Backend-assigned metadata of a stored document.
///
/// On the wire these are the `$`-prefixed keys of a document body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMeta {
    #[serde(rename = "$id")]
    pub id: DocumentId,
    #[serde(rename = "$collectionId", default)]
    pub collection_id: String,
    #[serde(rename = "$databaseId", default)]
    pub database_id: String,
    #[serde(rename = "$createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "$updatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "$permissions", default)]
    pub permissions: Vec<String>,
}

/// An untyped document: metadata plus field values in wire form.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    pub meta: DocumentMeta,
    pub fields: Map<String, Value>,
}

impl RawDocument {
    /// Splits a wire body into metadata and fields.
    ///
    /// Every `$`-prefixed key is treated as metadata; unknown metadata keys are dropped.
    pub fn from_wire(body: Map<String, Value>) -> DocumentStoreResult<Self> {
        let (meta, fields): (Map<String, Value>, Map<String, Value>) =
            body.into_iter().partition(|(key, _)| key.starts_with('$'));

        Ok(Self {
            meta: serde_json::from_value(Value::Object(meta))?,
            fields,
        })
    }

    /// Joins metadata and fields back into a single wire body.
    pub fn into_wire(self) -> DocumentStoreResult<Map<String, Value>> {
        let mut body = match serde_json::to_value(&self.meta)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        body.extend(self.fields);

        Ok(body)
    }

    pub fn id(&self) -> &DocumentId {
        &self.meta.id
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

/// Core trait for the typed shape of a collection's documents.
///
/// A record type pins exactly one schema; the collection it is stored in is resolved
/// from configuration by the schema name. Field names are mapped to the schema's
/// attribute names through serde.
///
/// # Example
///
/// ```ignore
/// use lexstore_core::{document::Record, schema::{FieldDefinition, Schema}};
/// use serde::{Serialize, Deserialize};
///
/// static NOTE: Schema = Schema::new("Note", &[FieldDefinition::string("title").required()]);
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// pub struct Note {
///     pub title: String,
/// }
///
/// impl Record for Note {
///     fn schema() -> &'static Schema {
///         &NOTE
///     }
/// }
/// ```
pub trait Record: Serialize + for<'de> Deserialize<'de> + Send + Sync + Clone + 'static {
    /// Returns the schema this record conforms to.
    fn schema() -> &'static Schema;
}

/// Extension trait converting records to and from their application-form field map.
///
/// Automatically implemented for every [`Record`].
pub trait RecordExt: Record {
    /// Serializes this record into a field map.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the record is not a JSON object.
    fn to_fields(&self) -> DocumentStoreResult<Map<String, Value>>;

    /// Deserializes a record from a field map.
    ///
    /// # Errors
    ///
    /// Returns an error if a field is missing or has the wrong type.
    fn from_fields(fields: Map<String, Value>) -> DocumentStoreResult<Self>;
}

impl<R: Record> RecordExt for R {
    fn to_fields(&self) -> DocumentStoreResult<Map<String, Value>> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(crate::error::DocumentStoreError::InvalidDocument(format!(
                "record {} serialized to a non-object value: {other}",
                R::schema().name
            ))),
        }
    }

    fn from_fields(fields: Map<String, Value>) -> DocumentStoreResult<Self> {
        Ok(serde_json::from_value(Value::Object(fields))?)
    }
}

/// A typed record together with the metadata of the document holding it.
#[derive(Debug, Clone, PartialEq)]
pub struct Stored<R> {
    pub meta: DocumentMeta,
    pub record: R,
}

impl<R> Stored<R> {
    pub fn id(&self) -> &DocumentId {
        &self.meta.id
    }

    pub fn into_record(self) -> R {
        self.record
    }
}

impl<R> Deref for Stored<R> {
    type Target = R;

    fn deref(&self) -> &Self::Target {
        &self.record
    }
}

/// Returned by a successful delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirmation {
    pub collection_id: String,
    pub document_id: DocumentId,
}
