//! Appwrite backend implementation for lexstore.
//!
//! This crate implements the `DocumentBackend` trait over the Appwrite REST API,
//! scoped to a single database of a single project.
//!
//! To use this backend, include the `appwrite` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! lexstore = { version = "x.y.z", features = ["appwrite"] }
//! ```
//!
//! # Connection
//!
//! The backend needs an endpoint, a project id, an API key and a database id. These
//! are usually read from the environment into a `BackendConfig`.
//!
//! # Example
//!
//! ```ignore
//! use lexstore::{appwrite::AppwriteBackendBuilder, prelude::*};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BackendConfig::from_env()?;
//!     let backend = AppwriteBackendBuilder::from_config(&config).build().await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as lexstore_appwrite;

pub mod error;
pub mod store;

pub use store::{AppwriteBackend, AppwriteBackendBuilder};
