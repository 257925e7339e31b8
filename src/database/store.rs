use super::Document;
use crate::error::Result;
use crate::query_builder::{PageWindow, Predicate, QueryDescriptor};
use async_trait::async_trait;
use uuid::Uuid;

/// Storage backend consumed by repositories and the pagination executor
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Documents matching the descriptor's predicate, in its sort order,
    /// shaped by its projection and sliced by `window` when given
    async fn find_matching(
        &self,
        descriptor: &QueryDescriptor,
        window: Option<PageWindow>,
    ) -> Result<Vec<Document>>;

    /// Number of documents matching `predicate`, ignoring any window
    async fn count_matching(&self, collection: &str, predicate: &Predicate) -> Result<u64>;

    /// Store a new document; its `id` must be unique within the collection
    async fn insert(&self, collection: &str, document: Document) -> Result<Document>;

    async fn find_by_id(&self, collection: &str, id: Uuid) -> Result<Option<Document>>;

    /// Overwrite the document with the same `id`; `None` when it does not exist
    async fn replace(&self, collection: &str, document: Document) -> Result<Option<Document>>;

    /// Overwrite the document only while its stored `__v` still equals
    /// `expected_version`. `None` when it is missing or was changed in between.
    async fn replace_versioned(
        &self,
        collection: &str,
        document: Document,
        expected_version: u32,
    ) -> Result<Option<Document>>;
}
