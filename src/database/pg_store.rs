//! # PostgreSQL Document Store
//!
//! One table per collection, each row an `id UUID` plus a `body JSONB`.
//! Descriptors are rendered with `sqlx::QueryBuilder`; every field name and
//! value is a bound parameter, so nothing from a request is spliced into SQL.
//! Table names come from a fixed allowlist.
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS taskboard_tasks (
//!   id UUID PRIMARY KEY,
//!   body JSONB NOT NULL
//! );
//! ```

use super::{Document, DocumentStore};
use crate::constants::{collections, fields};
use crate::error::{Result, TaskboardError};
use crate::query_builder::{
    Condition, FieldKind, FieldValue, PageWindow, Predicate, QueryDescriptor, SortKey,
};
use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::time::Instant;
use tracing::debug;
use uuid::Uuid;

type Body = Json<Map<String, Value>>;

#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the collection tables if they do not exist yet
    pub async fn ensure_schema(&self) -> Result<()> {
        for collection in collections::ALL {
            let table = table_name(collection)?;
            let sql =
                format!("CREATE TABLE IF NOT EXISTS {table} (id UUID PRIMARY KEY, body JSONB NOT NULL)");
            sqlx::query(&sql).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// `SELECT body ... WHERE ... ORDER BY ... LIMIT ... OFFSET ...`
    pub fn select_query(
        descriptor: &QueryDescriptor,
        window: Option<PageWindow>,
    ) -> Result<QueryBuilder<'static, Postgres>> {
        let table = table_name(descriptor.collection())?;
        let mut query = QueryBuilder::new(format!("SELECT body FROM {table}"));
        push_where(&mut query, descriptor.predicate());

        for (index, key) in descriptor.sort().keys().iter().enumerate() {
            query.push(if index == 0 { " ORDER BY " } else { ", " });
            push_sort_key(&mut query, key);
        }

        if let Some(window) = window {
            let offset = i64::try_from(window.skip).unwrap_or(i64::MAX);
            query
                .push(" LIMIT ")
                .push_bind(i64::from(window.limit))
                .push(" OFFSET ")
                .push_bind(offset);
        }

        Ok(query)
    }

    /// `SELECT COUNT(*) ... WHERE ...`
    pub fn count_query(
        collection: &str,
        predicate: &Predicate,
    ) -> Result<QueryBuilder<'static, Postgres>> {
        let table = table_name(collection)?;
        let mut query = QueryBuilder::new(format!("SELECT COUNT(*) FROM {table}"));
        push_where(&mut query, predicate);
        Ok(query)
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn find_matching(
        &self,
        descriptor: &QueryDescriptor,
        window: Option<PageWindow>,
    ) -> Result<Vec<Document>> {
        let started = Instant::now();
        let mut query = Self::select_query(descriptor, window)?;
        let bodies: Vec<Body> = query.build_query_scalar().fetch_all(&self.pool).await?;

        debug!(
            collection = %descriptor.collection(),
            rows = bodies.len(),
            duration_ms = started.elapsed().as_millis() as u64,
            "find_matching"
        );

        Ok(bodies
            .into_iter()
            .map(|Json(body)| descriptor.projection().apply(Document::from(body)))
            .collect())
    }

    async fn count_matching(&self, collection: &str, predicate: &Predicate) -> Result<u64> {
        let mut query = Self::count_query(collection, predicate)?;
        let count: i64 = query.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn insert(&self, collection: &str, document: Document) -> Result<Document> {
        let table = table_name(collection)?;
        let id = document
            .id()
            .ok_or_else(|| TaskboardError::validation("document is missing a valid id"))?;
        let sql = format!("INSERT INTO {table} (id, body) VALUES ($1, $2)");
        sqlx::query(&sql)
            .bind(id)
            .bind(Json(document.as_map().clone()))
            .execute(&self.pool)
            .await?;

        crate::logging::log_database_operation(
            "insert",
            Some(collection),
            Some(&id.to_string()),
            "ok",
            None,
        );
        Ok(document)
    }

    async fn find_by_id(&self, collection: &str, id: Uuid) -> Result<Option<Document>> {
        let table = table_name(collection)?;
        let sql = format!("SELECT body FROM {table} WHERE id = $1");
        let body: Option<Body> = sqlx::query_scalar(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(body.map(|Json(body)| Document::from(body)))
    }

    async fn replace(&self, collection: &str, document: Document) -> Result<Option<Document>> {
        let table = table_name(collection)?;
        let id = document
            .id()
            .ok_or_else(|| TaskboardError::validation("document is missing a valid id"))?;
        let sql = format!("UPDATE {table} SET body = $2 WHERE id = $1 RETURNING body");
        let body: Option<Body> = sqlx::query_scalar(&sql)
            .bind(id)
            .bind(Json(document.as_map().clone()))
            .fetch_optional(&self.pool)
            .await?;

        crate::logging::log_database_operation(
            "replace",
            Some(collection),
            Some(&id.to_string()),
            if body.is_some() { "ok" } else { "missing" },
            None,
        );
        Ok(body.map(|Json(body)| Document::from(body)))
    }

    async fn replace_versioned(
        &self,
        collection: &str,
        document: Document,
        expected_version: u32,
    ) -> Result<Option<Document>> {
        let table = table_name(collection)?;
        let id = document
            .id()
            .ok_or_else(|| TaskboardError::validation("document is missing a valid id"))?;
        let body: Option<Body> = sqlx::query_scalar(&versioned_update_sql(table))
            .bind(id)
            .bind(Json(document.as_map().clone()))
            .bind(fields::VERSION)
            .bind(i64::from(expected_version))
            .fetch_optional(&self.pool)
            .await?;

        crate::logging::log_database_operation(
            "replace_versioned",
            Some(collection),
            Some(&id.to_string()),
            if body.is_some() { "ok" } else { "stale" },
            None,
        );
        Ok(body.map(|Json(body)| Document::from(body)))
    }
}

/// Compare-and-swap on the stored version field; a missing field reads as 0
fn versioned_update_sql(table: &str) -> String {
    format!(
        "UPDATE {table} SET body = $2 \
         WHERE id = $1 AND COALESCE((body ->> $3)::bigint, 0) = $4 RETURNING body"
    )
}

fn table_name(collection: &str) -> Result<&'static str> {
    match collection {
        collections::TASKS => Ok("taskboard_tasks"),
        collections::COMMENTS => Ok("taskboard_comments"),
        collections::USERS => Ok("taskboard_users"),
        other => Err(TaskboardError::DataAccess(format!(
            "unknown collection: {other}"
        ))),
    }
}

fn cast_for(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Text | FieldKind::IdList => "",
        FieldKind::Boolean => "::boolean",
        FieldKind::Number => "::double precision",
        FieldKind::Timestamp => "::timestamptz",
        FieldKind::Id => "::uuid",
    }
}

/// `(body ->> $n)` with the cast matching `kind`
fn push_field(query: &mut QueryBuilder<'static, Postgres>, field: &str, kind: Option<FieldKind>) {
    query.push("(body ->> ").push_bind(field.to_string()).push(")");
    if let Some(kind) = kind {
        query.push(cast_for(kind));
    }
}

fn push_value(query: &mut QueryBuilder<'static, Postgres>, value: &FieldValue) {
    match value {
        FieldValue::Null => {
            query.push("NULL");
        }
        FieldValue::Bool(b) => {
            query.push_bind(*b);
        }
        FieldValue::Number(n) => {
            query.push_bind(*n);
        }
        FieldValue::Text(s) => {
            query.push_bind(s.clone());
        }
        FieldValue::Timestamp(ts) => {
            query.push_bind(*ts);
        }
        FieldValue::Id(id) => {
            query.push_bind(*id);
        }
    }
}

/// Escape LIKE metacharacters so the search term matches literally
fn like_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn push_condition(query: &mut QueryBuilder<'static, Postgres>, condition: &Condition) {
    match condition {
        Condition::Compare {
            field,
            kind,
            operator,
            value,
        } => {
            push_field(query, field, Some(*kind));
            if *kind == FieldKind::Text {
                query.push(" COLLATE \"C\"");
            }
            query.push(" ").push(operator.as_sql()).push(" ");
            push_value(query, value);
        }
        Condition::IsNull { field } => {
            push_field(query, field, None);
            query.push(" IS NULL");
        }
        Condition::IsNotNull { field } => {
            push_field(query, field, None);
            query.push(" IS NOT NULL");
        }
        Condition::Contains { field, needle } => {
            push_field(query, field, None);
            query.push(" ILIKE ").push_bind(like_pattern(needle));
        }
        Condition::ArrayContains { field, value } => {
            query
                .push("(body -> ")
                .push_bind(field.clone())
                .push(") @> ")
                .push_bind(Json(Value::Array(vec![value.to_json()])));
        }
        Condition::AnyOf(conditions) if conditions.is_empty() => {
            query.push("FALSE");
        }
        Condition::AnyOf(conditions) => {
            query.push("(");
            for (index, condition) in conditions.iter().enumerate() {
                if index > 0 {
                    query.push(" OR ");
                }
                push_condition(query, condition);
            }
            query.push(")");
        }
    }
}

fn push_where(query: &mut QueryBuilder<'static, Postgres>, predicate: &Predicate) {
    for (index, clause) in predicate.clauses().iter().enumerate() {
        query.push(if index == 0 { " WHERE " } else { " AND " });
        push_condition(query, clause);
    }
}

fn push_sort_key(query: &mut QueryBuilder<'static, Postgres>, key: &SortKey) {
    push_field(query, &key.field, Some(key.kind));
    if key.kind == FieldKind::Text {
        query.push(" COLLATE \"C\"");
    }
    query.push(" ").push(key.direction.as_sql());
}
