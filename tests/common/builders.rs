//! Fixture builders that write straight to a store so timestamps and
//! deletion state are under the test's control.

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::Arc;
use taskboard_core::config::TaskboardConfig;
use taskboard_core::constants::collections;
use taskboard_core::database::{Document, DocumentStore, InMemoryStore};
use taskboard_core::models::{
    DeletionState, NewTask, NewUser, Task, User, UserRole, UserStatus,
};
use taskboard_core::repositories::TaskRepository;
use uuid::Uuid;

/// Fixed origin so `createdAt` ordering is deterministic
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
}

pub struct TaskBuilder {
    title: String,
    description: String,
    is_completed: bool,
    owner: Uuid,
    readers: Vec<Uuid>,
    created_at: DateTime<Utc>,
    deleted: bool,
}

impl TaskBuilder {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            description: "plain description".to_string(),
            is_completed: false,
            owner: Uuid::new_v4(),
            readers: Vec::new(),
            created_at: base_time(),
            deleted: false,
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn completed(mut self) -> Self {
        self.is_completed = true;
        self
    }

    pub fn owner(mut self, owner: Uuid) -> Self {
        self.owner = owner;
        self
    }

    pub fn reader(mut self, reader: Uuid) -> Self {
        self.readers.push(reader);
        self
    }

    /// Minutes after [`base_time`]
    pub fn created_minutes_after(mut self, minutes: i64) -> Self {
        self.created_at = base_time() + Duration::minutes(minutes);
        self
    }

    pub fn deleted(mut self) -> Self {
        self.deleted = true;
        self
    }

    pub fn build(self) -> Task {
        let mut task = Task::new(
            self.owner,
            NewTask {
                title: self.title,
                description: self.description,
                is_completed: self.is_completed,
            },
        );
        task.readers = self.readers;
        task.created_at = self.created_at;
        task.updated_at = self.created_at;
        if self.deleted {
            task.deletion = DeletionState::Deleted {
                at: self.created_at + Duration::hours(1),
            };
        }
        task
    }

    pub async fn insert(self, store: &dyn DocumentStore) -> Task {
        let task = self.build();
        store
            .insert(collections::TASKS, Document::from_model(&task).unwrap())
            .await
            .unwrap();
        task
    }
}

pub async fn insert_user(
    store: &dyn DocumentStore,
    name: &str,
    role: UserRole,
    status: UserStatus,
) -> User {
    let user = User::new(NewUser {
        name: name.to_string(),
        email: format!("{name}@example.com"),
        role,
        status,
    });
    store
        .insert(collections::USERS, Document::from_model(&user).unwrap())
        .await
        .unwrap();
    user
}

pub fn task_repository(store: Arc<InMemoryStore>) -> TaskRepository {
    TaskRepository::new(store, &TaskboardConfig::default())
}

/// Five live tasks T1..T5 created one minute apart, T5 newest
pub async fn seed_five_tasks(store: &dyn DocumentStore) -> Vec<Task> {
    let mut tasks = Vec::new();
    for n in 1..=5 {
        let task = TaskBuilder::new(&format!("T{n}"))
            .created_minutes_after(n)
            .insert(store)
            .await;
        tasks.push(task);
    }
    tasks
}

pub fn titles(docs: &[Document]) -> Vec<String> {
    docs.iter()
        .map(|doc| doc.get("title").and_then(|v| v.as_str()).unwrap_or_default().to_string())
        .collect()
}
