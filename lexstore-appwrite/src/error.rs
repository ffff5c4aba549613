//! Translation of Appwrite error responses into store errors.

use serde::Deserialize;

use lexstore_core::{document::DocumentId, error::DocumentStoreError};

pub const DOCUMENT_NOT_FOUND: &str = "document_not_found";
pub const COLLECTION_NOT_FOUND: &str = "collection_not_found";

/// Body of a failed Appwrite response.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// What a request addressed, used to fill in not-found errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct Target<'a> {
    pub collection: Option<&'a str>,
    pub document: Option<&'a DocumentId>,
}

impl<'a> Target<'a> {
    pub fn database() -> Self {
        Self::default()
    }

    pub fn collection(collection: &'a str) -> Self {
        Self { collection: Some(collection), document: None }
    }

    pub fn document(collection: &'a str, document: &'a DocumentId) -> Self {
        Self { collection: Some(collection), document: Some(document) }
    }
}

/// Maps a non-success response to an error.
///
/// Only the two not-found types are classified; every other payload is carried
/// unmodified in [`DocumentStoreError::Backend`].
pub fn from_response(status: u16, body: &str, target: Target<'_>) -> DocumentStoreError {
    let Ok(error) = serde_json::from_str::<ErrorBody>(body) else {
        let message = match body.trim() {
            "" => format!("HTTP {status}"),
            text => text.to_string(),
        };

        return DocumentStoreError::Backend { status: Some(status), kind: None, message };
    };

    match (error.kind.as_deref(), target) {
        (Some(DOCUMENT_NOT_FOUND), Target { collection, document: Some(document) }) => {
            DocumentStoreError::DocumentNotFound(
                document.to_string(),
                collection.unwrap_or_default().to_string(),
            )
        }
        (Some(COLLECTION_NOT_FOUND), Target { collection: Some(collection), .. }) => {
            DocumentStoreError::CollectionNotFound(collection.to_string())
        }
        _ => DocumentStoreError::Backend {
            status: Some(error.code.unwrap_or(status)),
            kind: error.kind,
            message: error.message,
        },
    }
}

pub(crate) fn transport(err: reqwest::Error) -> DocumentStoreError {
    DocumentStoreError::Transport(err.to_string())
}
