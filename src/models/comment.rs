use super::{validate_text, DeletionState};
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const CONTENT_MIN: usize = 3;
pub const CONTENT_MAX: usize = 255;

/// A comment attached to a task by id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub content: String,
    #[serde(rename = "deletedAt", default)]
    pub deletion: DeletionState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "__v", default)]
    pub version: u32,
}

impl Comment {
    pub fn new(payload: NewComment) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            content: payload.content,
            deletion: DeletionState::Live,
            created_at: now,
            updated_at: now,
            version: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewComment {
    pub content: String,
}

impl NewComment {
    pub fn validated(self) -> Result<Self> {
        Ok(Self {
            content: validate_text("content", &self.content, CONTENT_MIN, CONTENT_MAX)?,
        })
    }
}
