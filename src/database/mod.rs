//! # Document Storage
//!
//! Everything below the query builder: the stored record type, the
//! [`DocumentStore`] trait the pagination executor runs against, and its two
//! backends.
//!
//! ## Key Components
//!
//! - [`document`] - Opaque JSON records keyed by `id`
//! - [`store`] - The storage trait
//! - [`memory_store`] - In-process backend used by tests and local runs
//! - [`pg_store`] - PostgreSQL backend over JSONB tables
//! - [`connection`] - Pool construction from configuration
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use taskboard_core::config::DatabaseConfig;
//! use taskboard_core::database::{DatabaseConnection, PgDocumentStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = DatabaseConnection::connect(&DatabaseConfig::default()).await?;
//! let store = PgDocumentStore::new(db.pool().clone());
//! store.ensure_schema().await?;
//! # Ok(())
//! # }
//! ```

pub mod connection;
pub mod document;
pub mod memory_store;
pub mod pg_store;
pub mod store;

pub use connection::DatabaseConnection;
pub use document::Document;
pub use memory_store::InMemoryStore;
pub use pg_store::PgDocumentStore;
pub use store::DocumentStore;
