//! # Task Repository
//!
//! Task persistence plus the two paginated listings. Listings parse the raw
//! query string once, scope a base descriptor by soft-delete state (and by
//! reader for shared listings), refine it with the query builder and run it
//! through the pagination executor.

use crate::config::{PaginationConfig, TaskboardConfig};
use crate::constants::{collections, fields};
use crate::database::{Document, DocumentStore};
use crate::error::{Result, TaskboardError};
use crate::models::{DeletionState, NewTask, Task, TaskUpdate, TASK_SCHEMA};
use crate::query_builder::{
    paginate, refine, Condition, FieldValue, ListQuery, PageOptions, PaginatedResult,
    QueryDescriptor, RawParams,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Reads that lose a version race are retried this many times before the
/// write is reported as a conflict
const MAX_WRITE_ATTEMPTS: u32 = 64;

/// Which tasks a listing starts from before query-string refinement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskListScope {
    /// Every task (admin listing)
    All,
    /// Tasks the user has been added to as a reader
    SharedWith(Uuid),
}

impl TaskListScope {
    fn base_descriptor(self, query: &ListQuery) -> QueryDescriptor {
        let base = QueryDescriptor::new(collections::TASKS).scoped(query.deleted);
        match self {
            TaskListScope::All => base,
            TaskListScope::SharedWith(user_id) => base.where_condition(
                Condition::array_contains(fields::READERS, FieldValue::Id(user_id)),
            ),
        }
    }
}

#[derive(Clone)]
pub struct TaskRepository {
    store: Arc<dyn DocumentStore>,
    pagination: PaginationConfig,
    search_fields: Vec<String>,
}

impl TaskRepository {
    pub fn new(store: Arc<dyn DocumentStore>, config: &TaskboardConfig) -> Self {
        Self {
            store,
            pagination: config.pagination.clone(),
            search_fields: config.search.task_fields.clone(),
        }
    }

    pub async fn create(&self, owner: Uuid, payload: NewTask) -> Result<Task> {
        let task = Task::new(owner, payload.validated()?);
        self.store
            .insert(collections::TASKS, Document::from_model(&task)?)
            .await?;
        info!(task_id = %task.id, owner = %owner, "Task created");
        Ok(task)
    }

    /// Any task with this id, deleted or not
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>> {
        self.store
            .find_by_id(collections::TASKS, id)
            .await?
            .map(Document::into_model)
            .transpose()
    }

    pub async fn find_live_by_id(&self, id: Uuid) -> Result<Option<Task>> {
        Ok(self
            .find_by_id(id)
            .await?
            .filter(|task| !task.deletion.is_deleted()))
    }

    pub async fn update(&self, id: Uuid, update: TaskUpdate) -> Result<Option<Task>> {
        let update = update.validated()?;
        self.modify_live(id, |task| task.apply(update.clone())).await
    }

    /// Mark a live task deleted; `None` when it is absent or already deleted
    pub async fn soft_delete(&self, id: Uuid) -> Result<Option<Task>> {
        let deleted = self
            .modify_live(id, |task| {
                task.deletion = DeletionState::Deleted { at: Utc::now() };
                task.touch();
            })
            .await?;
        if deleted.is_some() {
            info!(task_id = %id, "Task soft deleted");
        }
        Ok(deleted)
    }

    pub async fn append_comment(&self, id: Uuid, comment_id: Uuid) -> Result<Option<Task>> {
        self.modify_live(id, |task| {
            task.comments.push(comment_id);
            task.touch();
        })
        .await
    }

    /// Add readers not already present, keeping first-seen order
    pub async fn append_readers(&self, id: Uuid, readers: &[Uuid]) -> Result<Option<Task>> {
        self.modify_live(id, |task| {
            for reader in readers {
                if !task.readers.contains(reader) {
                    task.readers.push(*reader);
                }
            }
            task.touch();
        })
        .await
    }

    /// One page of tasks for `scope`, refined by the raw query-string pairs
    pub async fn find_paginated(
        &self,
        scope: TaskListScope,
        raw: &RawParams,
    ) -> Result<PaginatedResult> {
        let query = ListQuery::parse(raw, &TASK_SCHEMA);
        let descriptor = refine(
            scope.base_descriptor(&query),
            &query,
            self.search_fields.as_slice(),
        );
        let options = PageOptions::from_query(&query, &self.pagination);

        debug!(
            scope = ?scope,
            deleted = ?query.deleted,
            filters = query.filters.len(),
            "Listing tasks"
        );
        paginate(self.store.as_ref(), &descriptor, options).await
    }

    /// Read-modify-write of a live task, guarded by its `__v`. A concurrent
    /// writer forces a fresh read, so `change` may run more than once.
    async fn modify_live(&self, id: Uuid, change: impl Fn(&mut Task)) -> Result<Option<Task>> {
        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            let Some(mut task) = self.find_live_by_id(id).await? else {
                return Ok(None);
            };
            let expected_version = task.version;
            change(&mut task);

            let document = Document::from_model(&task)?;
            let written = self
                .store
                .replace_versioned(collections::TASKS, document, expected_version)
                .await?;
            if let Some(document) = written {
                return document.into_model().map(Some);
            }
            debug!(task_id = %id, attempt, "Task changed during write, retrying");
        }
        Err(TaskboardError::conflict("Task", id))
    }
}
