//! # Models
//!
//! Typed views of the stored documents. Repositories convert between these
//! and [`Document`](crate::database::Document) at the store boundary; listings
//! stay untyped because projection may remove required fields.

pub mod comment;
pub mod deletion;
pub mod task;
pub mod user;

pub use comment::{Comment, NewComment};
pub use deletion::DeletionState;
pub use task::{NewTask, Task, TaskUpdate, TASK_SCHEMA};
pub use user::{NewUser, User, UserRole, UserStatus};

use crate::error::{Result, TaskboardError};

/// Trim `value` and check its length in characters
pub(crate) fn validate_text(field: &str, value: &str, min: usize, max: usize) -> Result<String> {
    let trimmed = value.trim();
    let len = trimmed.chars().count();
    if len < min || len > max {
        return Err(TaskboardError::validation(format!(
            "{field} must be between {min} and {max} characters"
        )));
    }
    Ok(trimmed.to_string())
}
