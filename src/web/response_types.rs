//! # Web API Response Types
//!
//! Error responses (`{"error": {"code", "message"}}`) and the success envelope
//! (`{"success": true, "message"?, "data", "meta"?}`). Leverages thiserror for
//! structured errors and Axum's IntoResponse for HTTP conversion.

use crate::database::Document;
use crate::error::TaskboardError;
use crate::query_builder::{PaginatedResult, PaginationMeta};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// Web API specific errors with HTTP status code mappings
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    Forbidden { message: String },

    #[error("Authentication required")]
    Unauthorized,

    #[error("{message}")]
    Conflict { message: String },

    #[error("Invalid request: {message}")]
    BadRequest { message: String },

    #[error("Invalid UUID format: {uuid}")]
    InvalidUuid { uuid: String },

    #[error("Database operation failed: {operation}")]
    DatabaseError { operation: String },

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Create a BadRequest error with a custom message
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn invalid_uuid(uuid: impl Into<String>) -> Self {
        Self::InvalidUuid { uuid: uuid.into() }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::BadRequest { .. } | ApiError::InvalidUuid { .. } => StatusCode::BAD_REQUEST,
            ApiError::DatabaseError { .. } | ApiError::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (error_code, message) = match &self {
            ApiError::NotFound { message } => ("NOT_FOUND", message.as_str()),
            ApiError::Forbidden { message } => ("FORBIDDEN", message.as_str()),
            ApiError::Unauthorized => ("UNAUTHORIZED", "Authentication required"),
            ApiError::Conflict { message } => ("CONFLICT", message.as_str()),
            ApiError::BadRequest { message } => ("BAD_REQUEST", message.as_str()),
            ApiError::InvalidUuid { uuid } => ("INVALID_UUID", uuid.as_str()),
            ApiError::DatabaseError { operation } => ("DATABASE_ERROR", operation.as_str()),
            ApiError::Internal => ("INTERNAL_ERROR", "Internal server error"),
        };

        let error_response = json!({
            "error": {
                "code": error_code,
                "message": message
            }
        });

        (self.status_code(), Json(error_response)).into_response()
    }
}

/// Convert crate errors to API errors
impl From<TaskboardError> for ApiError {
    fn from(err: TaskboardError) -> Self {
        match err {
            TaskboardError::NotFound { .. } => ApiError::not_found(err.to_string()),
            TaskboardError::Forbidden(message) => ApiError::Forbidden { message },
            TaskboardError::Conflict { .. } => ApiError::Conflict {
                message: err.to_string(),
            },
            TaskboardError::Validation(message) => ApiError::BadRequest { message },
            TaskboardError::DataAccess(detail) => {
                crate::logging::log_error("web", "data_access", &detail, None);
                ApiError::DatabaseError {
                    operation: "Database operation failed".to_string(),
                }
            }
            other => {
                crate::logging::log_error("web", "request", &other.to_string(), None);
                ApiError::Internal
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

/// Result type alias for web API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Success envelope shared by every endpoint
#[derive(Debug, Serialize)]
pub struct SuccessResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PaginationMeta>,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
            meta: None,
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::data(data)
        }
    }
}

impl SuccessResponse<Vec<Document>> {
    /// `data` holds the page of documents, `meta` the pagination metadata
    pub fn paginated(result: PaginatedResult) -> Self {
        let (docs, meta) = result.into_parts();
        Self {
            meta: Some(meta),
            ..Self::data(docs)
        }
    }
}

impl<T: Serialize> IntoResponse for SuccessResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
