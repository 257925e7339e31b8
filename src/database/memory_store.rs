//! Process-local document store.

use super::{Document, DocumentStore};
use crate::constants::fields;
use crate::error::{Result, TaskboardError};
use crate::query_builder::{PageWindow, Predicate, QueryDescriptor};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

/// Evaluates descriptors in process. Collections are created on first insert.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    collections: RwLock<HashMap<String, BTreeMap<Uuid, Document>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .get(collection)
            .map_or(0, BTreeMap::len)
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }

    fn require_id(document: &Document) -> Result<Uuid> {
        document
            .id()
            .ok_or_else(|| TaskboardError::validation("document is missing a valid id"))
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn find_matching(
        &self,
        descriptor: &QueryDescriptor,
        window: Option<PageWindow>,
    ) -> Result<Vec<Document>> {
        let mut matched: Vec<Document> = {
            let collections = self.collections.read();
            collections
                .get(descriptor.collection())
                .map(|documents| {
                    documents
                        .values()
                        .filter(|document| descriptor.predicate().matches(document))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default()
        };

        matched.sort_by(|a, b| descriptor.sort().compare(a, b));

        let (skip, take) = match window {
            Some(window) => (
                usize::try_from(window.skip).unwrap_or(usize::MAX),
                window.limit as usize,
            ),
            None => (0, usize::MAX),
        };

        Ok(matched
            .into_iter()
            .skip(skip)
            .take(take)
            .map(|document| descriptor.projection().apply(document))
            .collect())
    }

    async fn count_matching(&self, collection: &str, predicate: &Predicate) -> Result<u64> {
        let collections = self.collections.read();
        let count = collections.get(collection).map_or(0, |documents| {
            documents
                .values()
                .filter(|document| predicate.matches(document))
                .count()
        });
        Ok(count as u64)
    }

    async fn insert(&self, collection: &str, document: Document) -> Result<Document> {
        let id = Self::require_id(&document)?;
        let mut collections = self.collections.write();
        let documents = collections.entry(collection.to_string()).or_default();
        if documents.contains_key(&id) {
            return Err(TaskboardError::DataAccess(format!(
                "duplicate id {id} in collection {collection}"
            )));
        }
        documents.insert(id, document.clone());
        Ok(document)
    }

    async fn find_by_id(&self, collection: &str, id: Uuid) -> Result<Option<Document>> {
        let collections = self.collections.read();
        Ok(collections
            .get(collection)
            .and_then(|documents| documents.get(&id))
            .cloned())
    }

    async fn replace(&self, collection: &str, document: Document) -> Result<Option<Document>> {
        let id = Self::require_id(&document)?;
        let mut collections = self.collections.write();
        match collections
            .get_mut(collection)
            .and_then(|documents| documents.get_mut(&id))
        {
            Some(existing) => {
                *existing = document.clone();
                Ok(Some(document))
            }
            None => Ok(None),
        }
    }

    async fn replace_versioned(
        &self,
        collection: &str,
        document: Document,
        expected_version: u32,
    ) -> Result<Option<Document>> {
        let id = Self::require_id(&document)?;
        let mut collections = self.collections.write();
        let Some(existing) = collections
            .get_mut(collection)
            .and_then(|documents| documents.get_mut(&id))
        else {
            return Ok(None);
        };
        if stored_version(existing) != u64::from(expected_version) {
            return Ok(None);
        }
        *existing = document.clone();
        Ok(Some(document))
    }
}

fn stored_version(document: &Document) -> u64 {
    document
        .get(fields::VERSION)
        .and_then(serde_json::Value::as_u64)
        .unwrap_or(0)
}
