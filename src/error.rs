use thiserror::Error;

use crate::config::ConfigurationError;

#[derive(Debug, Error)]
pub enum TaskboardError {
    #[error("Data access error: {0}")]
    DataAccess(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("{resource} {id} kept changing while it was being written")]
    Conflict { resource: &'static str, id: String },
}

impl TaskboardError {
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn conflict(resource: &'static str, id: impl ToString) -> Self {
        Self::Conflict {
            resource,
            id: id.to_string(),
        }
    }
}

impl From<sqlx::Error> for TaskboardError {
    fn from(err: sqlx::Error) -> Self {
        TaskboardError::DataAccess(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TaskboardError>;
