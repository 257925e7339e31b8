//! # Task Handlers
//!
//! Listing, creation, ownership-checked mutation, sharing and commenting.
//! Listings hand the query string to the repository untouched; every
//! interpretation of it happens in the query builder.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use tracing::info;
use uuid::Uuid;

use crate::database::Document;
use crate::models::{NewComment, NewTask, Task, TaskUpdate};
use crate::query_builder::RawParams;
use crate::repositories::TaskListScope;
use crate::web::auth::CurrentUser;
use crate::web::response_types::{ApiError, ApiResult, SuccessResponse};
use crate::web::state::AppState;

fn parse_task_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::invalid_uuid(raw))
}

fn task_not_found() -> ApiError {
    ApiError::not_found("No task found with that id")
}

/// Load any task and require the caller to own it
async fn owned_task(
    state: &AppState,
    user: &CurrentUser,
    id: Uuid,
    action: &str,
) -> ApiResult<Task> {
    let task = state.tasks.find_by_id(id).await?.ok_or_else(task_not_found)?;
    if !task.is_owned_by(user.id) {
        return Err(ApiError::forbidden(format!(
            "You are not allowed to {action} this task"
        )));
    }
    Ok(task)
}

/// List all tasks: GET /v1/tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    user: CurrentUser,
    query: Result<Query<RawParams>, QueryRejection>,
) -> ApiResult<SuccessResponse<Vec<Document>>> {
    user.require_admin()?;
    let Query(raw) = query?;
    let result = state.tasks.find_paginated(TaskListScope::All, &raw).await?;
    Ok(SuccessResponse::paginated(result))
}

/// List tasks shared with the caller: GET /v1/tasks/shared/me
pub async fn list_shared_tasks(
    State(state): State<AppState>,
    user: CurrentUser,
    query: Result<Query<RawParams>, QueryRejection>,
) -> ApiResult<SuccessResponse<Vec<Document>>> {
    let Query(raw) = query?;
    let result = state
        .tasks
        .find_paginated(TaskListScope::SharedWith(user.id), &raw)
        .await?;
    Ok(SuccessResponse::paginated(result))
}

/// Create a task owned by the caller: POST /v1/tasks
pub async fn create_task(
    State(state): State<AppState>,
    user: CurrentUser,
    payload: Result<Json<NewTask>, JsonRejection>,
) -> ApiResult<SuccessResponse<Task>> {
    let Json(payload) = payload?;
    let task = state.tasks.create(user.id, payload).await?;
    Ok(SuccessResponse::with_message(task, "Task created successfully"))
}

/// GET /v1/tasks/:id
pub async fn get_task(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<SuccessResponse<Task>> {
    let id = parse_task_id(&id)?;
    let task = state.tasks.find_by_id(id).await?.ok_or_else(task_not_found)?;
    Ok(SuccessResponse::data(task))
}

/// PUT /v1/tasks/:id
pub async fn update_task(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    payload: Result<Json<TaskUpdate>, JsonRejection>,
) -> ApiResult<SuccessResponse<Task>> {
    let id = parse_task_id(&id)?;
    let Json(update) = payload?;
    owned_task(&state, &user, id, "update").await?;

    let task = state
        .tasks
        .update(id, update)
        .await?
        .ok_or_else(task_not_found)?;
    Ok(SuccessResponse::with_message(task, "Task updated successfully"))
}

/// DELETE /v1/tasks/:id
pub async fn delete_task(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<SuccessResponse<Task>> {
    let id = parse_task_id(&id)?;
    owned_task(&state, &user, id, "delete").await?;

    let task = state
        .tasks
        .soft_delete(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Task not found"))?;
    Ok(SuccessResponse::with_message(task, "Task deleted successfully"))
}

/// Add every active user except the owner as a reader: PUT /v1/tasks/:id/share
pub async fn share_task(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<SuccessResponse<Task>> {
    let id = parse_task_id(&id)?;
    let task = owned_task(&state, &user, id, "share").await?;

    let readers: Vec<Uuid> = state
        .users
        .find_active()
        .await?
        .into_iter()
        .map(|reader| reader.id)
        .filter(|reader_id| *reader_id != task.owner)
        .collect();

    let task = state
        .tasks
        .append_readers(id, &readers)
        .await?
        .ok_or_else(task_not_found)?;

    info!(task_id = %id, readers = task.readers.len(), "Task shared");
    Ok(SuccessResponse::with_message(task, "Task shared successfully"))
}

/// PUT /v1/tasks/:id/comment
pub async fn comment_task(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<String>,
    payload: Result<Json<NewComment>, JsonRejection>,
) -> ApiResult<SuccessResponse<Task>> {
    let id = parse_task_id(&id)?;
    let Json(payload) = payload?;
    state
        .tasks
        .find_live_by_id(id)
        .await?
        .ok_or_else(task_not_found)?;

    let comment = state.comments.create(payload).await?;
    let task = state
        .tasks
        .append_comment(id, comment.id)
        .await?
        .ok_or_else(task_not_found)?;
    Ok(SuccessResponse::with_message(task, "Comment created successfully"))
}
