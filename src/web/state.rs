//! # Web API Application State
//!
//! Repositories shared by every handler. Cloned per request; the store
//! behind them is reference counted.

use crate::config::TaskboardConfig;
use crate::database::DocumentStore;
use crate::repositories::{CommentRepository, TaskRepository, UserRepository};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub tasks: TaskRepository,
    pub comments: CommentRepository,
    pub users: UserRepository,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, config: &TaskboardConfig) -> Self {
        Self {
            tasks: TaskRepository::new(store.clone(), config),
            comments: CommentRepository::new(store.clone()),
            users: UserRepository::new(store),
        }
    }
}
