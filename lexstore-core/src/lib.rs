//! A typed document-store adapter with schema-aware field encoding.
//!
//! This crate is the core of the lexstore project and provides:
//!
//! - **Schemas** ([`schema`]) - Static field definitions with types and constraints
//! - **Array codec** ([`codec`]) - Text encoding of array fields at the adapter boundary
//! - **Documents and records** ([`document`]) - Wire documents, typed records and metadata
//! - **Partial updates** ([`patch`]) - Schema-checked field assignments
//! - **Backend abstraction** ([`backend`]) - The trait a hosted document database implements
//! - **Collections** ([`collection`]) - The create/read/update/delete adapter
//! - **Document store** ([`store`]) - Owner of a backend and the collection id mapping
//! - **Provisioning** ([`provision`]) - Idempotent creation of collections and attributes
//! - **Configuration** ([`config`]) - Startup settings read from the environment
//! - **Error handling** ([`error`]) - Error types and result types
//!
//! # Example
//!
//! ```ignore
//! use lexstore_core::{document::Record, schema::{FieldDefinition, Schema}};
//! use serde::{Serialize, Deserialize};
//!
//! static REMINDER: Schema = Schema::new("Reminder", &[
//!     FieldDefinition::string("reminderTitle").required(),
//! ]);
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! #[serde(rename_all = "camelCase")]
//! pub struct Reminder {
//!     pub reminder_title: String,
//! }
//!
//! impl Record for Reminder {
//!     fn schema() -> &'static Schema {
//!         &REMINDER
//!     }
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as lexstore_core;

pub mod backend;
pub mod codec;
pub mod collection;
pub mod config;
pub mod document;
pub mod error;
pub mod patch;
pub mod provision;
pub mod schema;
pub mod store;
