use crate::constants::collections;
use crate::database::{Document, DocumentStore};
use crate::error::Result;
use crate::models::{Comment, NewComment};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

#[derive(Clone)]
pub struct CommentRepository {
    store: Arc<dyn DocumentStore>,
}

impl CommentRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, payload: NewComment) -> Result<Comment> {
        let comment = Comment::new(payload.validated()?);
        self.store
            .insert(collections::COMMENTS, Document::from_model(&comment)?)
            .await?;
        info!(comment_id = %comment.id, "Comment created");
        Ok(comment)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>> {
        self.store
            .find_by_id(collections::COMMENTS, id)
            .await?
            .map(Document::into_model)
            .transpose()
    }
}
