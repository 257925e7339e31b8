//! Store doubles for failure and write-contention paths the in-memory store
//! never takes on its own.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use taskboard_core::database::{Document, DocumentStore, InMemoryStore};
use taskboard_core::error::{Result, TaskboardError};
use taskboard_core::models::Task;
use taskboard_core::query_builder::{PageWindow, Predicate, QueryDescriptor};
use uuid::Uuid;

/// Every call fails the way an unreachable database does
#[derive(Debug, Default)]
pub struct FailingStore;

fn unavailable() -> TaskboardError {
    TaskboardError::DataAccess("connection refused".to_string())
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn find_matching(
        &self,
        _descriptor: &QueryDescriptor,
        _window: Option<PageWindow>,
    ) -> Result<Vec<Document>> {
        Err(unavailable())
    }

    async fn count_matching(&self, _collection: &str, _predicate: &Predicate) -> Result<u64> {
        Err(unavailable())
    }

    async fn insert(&self, _collection: &str, _document: Document) -> Result<Document> {
        Err(unavailable())
    }

    async fn find_by_id(&self, _collection: &str, _id: Uuid) -> Result<Option<Document>> {
        Err(unavailable())
    }

    async fn replace(&self, _collection: &str, _document: Document) -> Result<Option<Document>> {
        Err(unavailable())
    }

    async fn replace_versioned(
        &self,
        _collection: &str,
        _document: Document,
        _expected_version: u32,
    ) -> Result<Option<Document>> {
        Err(unavailable())
    }
}

/// In-memory store where another writer appends `competing_comment` to the
/// task just before each of the next `interruptions` versioned writes lands
pub struct ContendedStore {
    inner: InMemoryStore,
    interruptions: AtomicU32,
    competing_comment: Uuid,
}

impl ContendedStore {
    pub fn new(interruptions: u32) -> Self {
        Self {
            inner: InMemoryStore::new(),
            interruptions: AtomicU32::new(interruptions),
            competing_comment: Uuid::new_v4(),
        }
    }

    pub fn competing_comment(&self) -> Uuid {
        self.competing_comment
    }

    async fn competing_write(&self, collection: &str, id: Uuid) -> Result<()> {
        let Some(current) = self.inner.find_by_id(collection, id).await? else {
            return Ok(());
        };
        let mut task: Task = current.into_model()?;
        task.comments.push(self.competing_comment);
        task.touch();
        self.inner
            .replace(collection, Document::from_model(&task)?)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for ContendedStore {
    async fn find_matching(
        &self,
        descriptor: &QueryDescriptor,
        window: Option<PageWindow>,
    ) -> Result<Vec<Document>> {
        self.inner.find_matching(descriptor, window).await
    }

    async fn count_matching(&self, collection: &str, predicate: &Predicate) -> Result<u64> {
        self.inner.count_matching(collection, predicate).await
    }

    async fn insert(&self, collection: &str, document: Document) -> Result<Document> {
        self.inner.insert(collection, document).await
    }

    async fn find_by_id(&self, collection: &str, id: Uuid) -> Result<Option<Document>> {
        self.inner.find_by_id(collection, id).await
    }

    async fn replace(&self, collection: &str, document: Document) -> Result<Option<Document>> {
        self.inner.replace(collection, document).await
    }

    async fn replace_versioned(
        &self,
        collection: &str,
        document: Document,
        expected_version: u32,
    ) -> Result<Option<Document>> {
        let interrupted = self
            .interruptions
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if interrupted {
            if let Some(id) = document.id() {
                self.competing_write(collection, id).await?;
            }
        }
        self.inner
            .replace_versioned(collection, document, expected_version)
            .await
    }
}
