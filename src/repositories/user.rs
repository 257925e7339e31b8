use crate::constants::{collections, fields};
use crate::database::{Document, DocumentStore};
use crate::error::Result;
use crate::models::{NewUser, User, UserStatus};
use crate::query_builder::{
    ComparisonOperator, Condition, FieldKind, FieldValue, QueryDescriptor, SoftDeleteScope,
};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn DocumentStore>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, payload: NewUser) -> Result<User> {
        let user = User::new(payload);
        self.store
            .insert(collections::USERS, Document::from_model(&user)?)
            .await?;
        Ok(user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        self.store
            .find_by_id(collections::USERS, id)
            .await?
            .map(Document::into_model)
            .transpose()
    }

    /// Live users whose status is active
    pub async fn find_active(&self) -> Result<Vec<User>> {
        let descriptor = QueryDescriptor::new(collections::USERS)
            .scoped(SoftDeleteScope::Live)
            .where_condition(Condition::compare(
                fields::STATUS,
                FieldKind::Text,
                ComparisonOperator::Eq,
                FieldValue::Text(UserStatus::Active.as_str().to_string()),
            ));

        self.store
            .find_matching(&descriptor, None)
            .await?
            .into_iter()
            .map(Document::into_model)
            .collect()
    }
}
