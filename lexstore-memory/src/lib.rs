//! In-memory document backend for lexstore.
//!
//! This crate provides a thread-safe, in-memory implementation of the `DocumentBackend`
//! trait. It behaves like the hosted backend where the adapter can observe it: ids are
//! unique per collection, unknown documents and collections are reported as not found,
//! updates merge fields, and once a collection has attributes, unknown keys and
//! oversized strings are rejected.
//!
//! # Quick Start
//!
//! ```ignore
//! use lexstore::{prelude::*, memory::InMemoryBackend};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = InMemoryBackend::builder()
//!         .with_collection("reminders", "Reminder")
//!         .build()
//!         .await?;
//!     let store = DocumentStore::new(backend, CollectionIds::new().with("Reminder", "reminders"));
//!
//!     let created = store.collection("reminders").create(fields).await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as lexstore_memory;

pub mod store;

pub use store::{InMemoryBackend, InMemoryBackendBuilder};
