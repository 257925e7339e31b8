#![allow(clippy::doc_markdown)] // Allow technical terms like PostgreSQL, SQLx in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Taskboard Core
//!
//! Request-to-query translation and pagination for a tasks/comments/users
//! REST backend over a document store.
//!
//! ## Overview
//!
//! Listing endpoints accept untrusted query strings (`?isCompleted=true&sort=-title&page=2`).
//! The [`query_builder`] turns them into a typed, allowlisted query descriptor
//! and the pagination executor runs that descriptor against a
//! [`DocumentStore`](database::DocumentStore), returning one page of documents
//! plus `totalDocs`/`totalPages`/`hasNextPage` metadata.
//!
//! ## Module Organization
//!
//! - [`query_builder`] - Parameter parsing, descriptor refinement and pagination
//! - [`database`] - Document type, store trait, in-memory and PostgreSQL stores
//! - [`models`] - Task, Comment and User with soft-delete state
//! - [`repositories`] - Per-resource data access built on the query builder
//! - [`web`] - axum routes for `/v1/tasks`
//! - [`config`] - Layered configuration
//! - [`logging`] - Structured tracing setup
//! - [`error`] - Structured error handling
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use taskboard_core::config::TaskboardConfig;
//! use taskboard_core::database::InMemoryStore;
//! use taskboard_core::models::NewTask;
//! use taskboard_core::query_builder::RawParams;
//! use taskboard_core::repositories::{TaskListScope, TaskRepository};
//! use uuid::Uuid;
//!
//! # tokio_test::block_on(async {
//! let tasks = TaskRepository::new(Arc::new(InMemoryStore::new()), &TaskboardConfig::default());
//! tasks
//!     .create(
//!         Uuid::new_v4(),
//!         NewTask {
//!             title: "Project Alpha".into(),
//!             description: "Kickoff".into(),
//!             is_completed: false,
//!         },
//!     )
//!     .await?;
//!
//! let raw = RawParams::from_pairs([("search", "alpha"), ("perPage", "5")]);
//! let page = tasks.find_paginated(TaskListScope::All, &raw).await?;
//! assert_eq!(page.meta.total_docs, 1);
//! # Ok::<(), taskboard_core::TaskboardError>(())
//! # }).unwrap();
//! ```

pub mod config;
pub mod constants;
pub mod database;
pub mod error;
pub mod logging;
pub mod models;
pub mod query_builder;
pub mod repositories;
pub mod web;

pub use config::{DatabaseConfig, PaginationConfig, SearchConfig, TaskboardConfig};
pub use database::{Document, DocumentStore, InMemoryStore, PgDocumentStore};
pub use error::{Result, TaskboardError};
pub use query_builder::{
    paginate, ListQuery, PageOptions, PaginatedResult, PaginationMeta, QueryBuilder,
    QueryDescriptor, RawParams,
};
pub use repositories::{CommentRepository, TaskListScope, TaskRepository, UserRepository};
