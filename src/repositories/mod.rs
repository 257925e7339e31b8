//! # Repositories
//!
//! Per-resource data access over a shared [`DocumentStore`](crate::database::DocumentStore).
//! Direct lookups return typed models; listings go through the query builder
//! and the pagination executor and return documents.

pub mod comment;
pub mod task;
pub mod user;

pub use comment::CommentRepository;
pub use task::{TaskListScope, TaskRepository};
pub use user::UserRepository;
