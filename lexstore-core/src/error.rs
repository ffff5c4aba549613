//! Error types and result types for document store operations.
//!
//! Every fallible operation in the workspace returns [`DocumentStoreResult<T>`].
//! Backend failures are carried unmodified; the only classification offered is
//! [`DocumentStoreError::is_not_found`].

use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Represents all possible errors that can occur when interacting with a document store.
#[derive(Error, Debug)]
pub enum DocumentStoreError {
    /// The backend rejected the request.
    ///
    /// `status` is the transport status code when one exists, `kind` the backend's
    /// machine-readable error type, and `message` its human-readable detail.
    #[error("Backend error{}: {message}", format_kind(.status, .kind))]
    Backend {
        status: Option<u16>,
        kind: Option<String>,
        message: String,
    },
    /// The request never produced a backend response (connection, TLS, body decoding).
    #[error("Transport error: {0}")]
    Transport(String),
    /// The requested document was not found in the collection.
    /// The first argument is the document ID, the second is the collection ID.
    #[error("Document not found {0} in collection {1}")]
    DocumentNotFound(String, String),
    /// The requested collection does not exist in the database.
    #[error("Collection not found: {0}")]
    CollectionNotFound(String),
    /// A document with the given ID already exists in the collection.
    #[error("Document {0} already exists in collection {1}")]
    DocumentAlreadyExists(String, String),
    /// A required configuration value is missing or malformed.
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// The document does not have the shape its schema requires.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
    /// Serialization/deserialization error when converting between record and wire forms.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// An encoded array field does not fit into its attribute.
    #[error("Field {field} encodes to {length} characters, attribute capacity is {capacity}")]
    CapacityExceeded {
        field: String,
        length: usize,
        capacity: usize,
    },
    /// One or more provisioning steps failed. Each entry describes a single failure.
    #[error("Provisioning failed with {} error(s): {}", .0.len(), .0.join("; "))]
    Provisioning(Vec<String>),
}

fn format_kind(status: &Option<u16>, kind: &Option<String>) -> String {
    match (status, kind) {
        (Some(status), Some(kind)) => format!(" ({status} {kind})"),
        (Some(status), None) => format!(" ({status})"),
        (None, Some(kind)) => format!(" ({kind})"),
        (None, None) => String::new(),
    }
}

impl DocumentStoreError {
    /// Returns `true` when the operation addressed a document or collection that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DocumentStoreError::DocumentNotFound(..) | DocumentStoreError::CollectionNotFound(_)
        )
    }

    /// Shorthand for a backend error without a transport status.
    pub fn backend(message: impl Into<String>) -> Self {
        DocumentStoreError::Backend {
            status: None,
            kind: None,
            message: message.into(),
        }
    }
}

/// A specialized `Result` type for document store operations.
pub type DocumentStoreResult<T> = Result<T, DocumentStoreError>;

impl From<SerdeJsonError> for DocumentStoreError {
    fn from(err: SerdeJsonError) -> Self {
        DocumentStoreError::Serialization(err.to_string())
    }
}
