//! Soft-delete state shared by every model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Serialized as the nullable `deletedAt` timestamp
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<DateTime<Utc>>", into = "Option<DateTime<Utc>>")]
pub enum DeletionState {
    #[default]
    Live,
    Deleted { at: DateTime<Utc> },
}

impl DeletionState {
    pub fn is_deleted(&self) -> bool {
        matches!(self, DeletionState::Deleted { .. })
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        match self {
            DeletionState::Live => None,
            DeletionState::Deleted { at } => Some(*at),
        }
    }
}

impl From<Option<DateTime<Utc>>> for DeletionState {
    fn from(value: Option<DateTime<Utc>>) -> Self {
        value.map_or(DeletionState::Live, |at| DeletionState::Deleted { at })
    }
}

impl From<DeletionState> for Option<DateTime<Utc>> {
    fn from(state: DeletionState) -> Self {
        state.deleted_at()
    }
}
