//! # Task Model
//!
//! A to-do item owned by one user, optionally shared with readers and carrying
//! a list of comment ids.
//!
//! ## Stored Shape
//!
//! ```json
//! {
//!   "id": "7f1c…",
//!   "title": "Project Alpha",
//!   "description": "Kickoff notes",
//!   "isCompleted": false,
//!   "owner": "0b4e…",
//!   "comments": [],
//!   "readers": [],
//!   "deletedAt": null,
//!   "createdAt": "2024-01-01T00:00:00Z",
//!   "updatedAt": "2024-01-01T00:00:00Z",
//!   "__v": 0
//! }
//! ```
//!
//! [`TASK_SCHEMA`] is the allowlist listings resolve query-string fields
//! against.

use super::{validate_text, DeletionState};
use crate::constants::collections;
use crate::error::Result;
use crate::query_builder::{FieldKind, FieldSchema, FieldSpec};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const TITLE_MIN: usize = 3;
pub const TITLE_MAX: usize = 30;
pub const DESCRIPTION_MIN: usize = 3;
pub const DESCRIPTION_MAX: usize = 255;

const TASK_FIELDS: &[FieldSpec] = &[
    FieldSpec::queryable("id", FieldKind::Id),
    FieldSpec::queryable("title", FieldKind::Text),
    FieldSpec::queryable("description", FieldKind::Text),
    FieldSpec::queryable("isCompleted", FieldKind::Boolean),
    FieldSpec::filter_only("owner", FieldKind::Id),
    FieldSpec::select_only("comments", FieldKind::IdList),
    FieldSpec::select_only("readers", FieldKind::IdList),
    FieldSpec::select_only("deletedAt", FieldKind::Timestamp),
    FieldSpec::queryable("createdAt", FieldKind::Timestamp),
    FieldSpec::queryable("updatedAt", FieldKind::Timestamp),
];

pub static TASK_SCHEMA: FieldSchema = FieldSchema::new(collections::TASKS, TASK_FIELDS);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub is_completed: bool,
    pub owner: Uuid,
    #[serde(default)]
    pub comments: Vec<Uuid>,
    #[serde(default)]
    pub readers: Vec<Uuid>,
    #[serde(rename = "deletedAt", default)]
    pub deletion: DeletionState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "__v", default)]
    pub version: u32,
}

impl Task {
    /// Build a live task from an already validated payload
    pub fn new(owner: Uuid, payload: NewTask) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: payload.title,
            description: payload.description,
            is_completed: payload.is_completed,
            owner,
            comments: Vec::new(),
            readers: Vec::new(),
            deletion: DeletionState::Live,
            created_at: now,
            updated_at: now,
            version: 0,
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner == user_id
    }

    /// Overwrite the fields present in `update` and bump the version
    pub fn apply(&mut self, update: TaskUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(is_completed) = update.is_completed {
            self.is_completed = is_completed;
        }
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
        self.version += 1;
    }
}

/// Request body for task creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub is_completed: bool,
}

impl NewTask {
    /// Trim and length-check the text fields
    pub fn validated(self) -> Result<Self> {
        Ok(Self {
            title: validate_text("title", &self.title, TITLE_MIN, TITLE_MAX)?,
            description: validate_text(
                "description",
                &self.description,
                DESCRIPTION_MIN,
                DESCRIPTION_MAX,
            )?,
            is_completed: self.is_completed,
        })
    }
}

/// Request body for a partial task update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_completed: Option<bool>,
}

impl TaskUpdate {
    pub fn validated(self) -> Result<Self> {
        Ok(Self {
            title: self
                .title
                .map(|title| validate_text("title", &title, TITLE_MIN, TITLE_MAX))
                .transpose()?,
            description: self
                .description
                .map(|description| {
                    validate_text(
                        "description",
                        &description,
                        DESCRIPTION_MIN,
                        DESCRIPTION_MAX,
                    )
                })
                .transpose()?,
            is_completed: self.is_completed,
        })
    }
}
