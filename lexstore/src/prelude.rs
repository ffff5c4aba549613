//! Convenient re-exports of commonly used types from lexstore.
//!
//! ```ignore
//! use lexstore::prelude::*;
//! ```

pub use lexstore_core::{
    backend::{BackendBuilder, DocumentBackend},
    collection::{Collection, TypedCollection},
    config::{BackendConfig, CollectionIds},
    document::{DeleteConfirmation, DocumentId, DocumentMeta, RawDocument, Record, RecordExt, Stored},
    error::{DocumentStoreError, DocumentStoreResult},
    patch::Patch,
    provision::{ProvisionReport, Provisioner},
    schema::{FieldDefinition, PrimitiveType, Schema},
    store::DocumentStore,
};
