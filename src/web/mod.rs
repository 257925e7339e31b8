//! # Web API
//!
//! axum router for the `/v1/tasks` resource.
//!
//! ## Routes
//!
//! | Method | Path | Policy |
//! |--------|------|--------|
//! | GET | `/v1/tasks` | admin |
//! | POST | `/v1/tasks` | any caller, becomes owner |
//! | GET | `/v1/tasks/shared/me` | any caller |
//! | GET | `/v1/tasks/:id` | any caller |
//! | PUT | `/v1/tasks/:id` | owner |
//! | DELETE | `/v1/tasks/:id` | owner |
//! | PUT | `/v1/tasks/:id/share` | owner |
//! | PUT | `/v1/tasks/:id/comment` | any caller |
//!
//! Every route needs a [`CurrentUser`] request extension.

pub mod auth;
pub mod handlers;
pub mod response_types;
pub mod state;

pub use auth::CurrentUser;
pub use response_types::{ApiError, ApiResult, SuccessResponse};
pub use state::AppState;

use axum::routing::{get, put};
use axum::Router;
use handlers::tasks;

pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/v1/tasks", task_routes())
        .with_state(state)
}

fn task_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(tasks::list_tasks).post(tasks::create_task))
        .route("/shared/me", get(tasks::list_shared_tasks))
        .route(
            "/:id",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route("/:id/share", put(tasks::share_task))
        .route("/:id/comment", put(tasks::comment_task))
}
