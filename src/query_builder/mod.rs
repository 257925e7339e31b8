//! # Query Builder System
//!
//! Turns untrusted listing parameters into a safe, paginated store query.
//!
//! ## Key Components
//!
//! - [`schema`] - Per-resource field allowlists and value coercion
//! - [`params`] - Raw query-string pairs and the typed [`ListQuery`]
//! - [`conditions`] - Predicate clauses with in-process evaluation
//! - [`descriptor`] - The query descriptor: predicate, projection, sort
//! - [`builder`] - The `filter → sort → limit_fields → search` stages
//! - [`pagination`] - Page options, metadata and the pagination executor
//!
//! ## Example Usage
//!
//! ```rust
//! use taskboard_core::models::task::TASK_SCHEMA;
//! use taskboard_core::query_builder::{ListQuery, QueryBuilder, QueryDescriptor, RawParams};
//!
//! let raw = RawParams::from_pairs([("isCompleted", "true"), ("sort", "-title")]);
//! let query = ListQuery::parse(&raw, &TASK_SCHEMA);
//! let base = QueryDescriptor::new("tasks").scoped(query.deleted);
//!
//! let descriptor = QueryBuilder::new(base, &query)
//!     .filter()
//!     .sort()
//!     .limit_fields()
//!     .search(&["title", "description"])
//!     .build();
//! assert_eq!(descriptor.predicate().len(), 2);
//! ```

pub mod builder;
pub mod conditions;
pub mod descriptor;
pub mod pagination;
pub mod params;
pub mod schema;

pub use builder::{refine, QueryBuilder};
pub use conditions::{ComparisonOperator, Condition, FieldValue, Predicate};
pub use descriptor::{
    Projection, QueryDescriptor, SoftDeleteScope, SortDirection, SortKey, SortSpec,
};
pub use pagination::{paginate, PageOptions, PageWindow, PaginatedResult, PaginationMeta};
pub use params::{FieldFilter, ListQuery, RawParams};
pub use schema::{FieldKind, FieldSchema, FieldSpec};
