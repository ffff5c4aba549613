//! Main lexstore crate providing typed document storage for a legal-services backend.
//!
//! This crate is the primary entry point of the lexstore workspace. It re-exports the
//! core types from `lexstore-core`, gives access to the storage backends, and ships the
//! ten legal-services schemas together with their record types.
//!
//! # Features
//!
//! - **Typed records** - One serde struct per collection, bound to its schema
//! - **Array fields** - Sequences of strings stored as JSON text, encoded at the adapter
//! - **Provisioning** - Idempotent creation of collections and attributes
//! - **Multiple backends** - Appwrite in production, in-memory for tests
//!
//! # Quick Start
//!
//! ```ignore
//! use lexstore::{legal::{self, Reminder}, memory::InMemoryBackend, prelude::*};
//!
//! #[tokio::main]
//! async fn main() -> DocumentStoreResult<()> {
//!     let backend = InMemoryBackend::new();
//!     let collections = Provisioner::new(&backend)
//!         .provision(&legal::ALL_SCHEMAS)
//!         .await
//!         .into_result()?
//!         .collection_ids();
//!
//!     let store = DocumentStore::new(backend, collections);
//!     let reminders = store.typed_collection::<Reminder>()?;
//!
//!     let created = reminders.create(reminder).await?;
//!     let read = reminders.read(created.id()).await?;
//!
//!     reminders
//!         .update(created.id(), Patch::new().set("reminderStatus", "done")?)
//!         .await?;
//!     reminders.delete(created.id()).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Backends
//!
//! - [`memory`] - In-memory storage for development and testing
//! - [`appwrite`] - Appwrite REST backend (requires the `appwrite` feature)

pub mod legal;
pub mod prelude;

pub use lexstore_core::{backend, codec, collection, config, document, error, patch, provision, schema, store};

/// In-memory storage backend implementations.
pub mod memory {
    pub use lexstore_memory::{InMemoryBackend, InMemoryBackendBuilder};
}

/// Appwrite storage backend implementations.
///
/// This module is only available when the `appwrite` feature is enabled.
#[cfg(feature = "appwrite")]
pub mod appwrite {
    pub use lexstore_appwrite::{AppwriteBackend, AppwriteBackendBuilder};
}
