//! In-memory representation of a not-yet-executed store query.

use super::conditions::{Condition, Predicate};
use super::schema::FieldKind;
use crate::constants::fields;
use crate::database::Document;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            // Nulls sort lowest in both directions, matching the in-memory order
            SortDirection::Ascending => "ASC NULLS FIRST",
            SortDirection::Descending => "DESC NULLS LAST",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub kind: FieldKind,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn ascending(field: &str, kind: FieldKind) -> Self {
        Self {
            field: field.to_string(),
            kind,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(field: &str, kind: FieldKind) -> Self {
        Self {
            field: field.to_string(),
            kind,
            direction: SortDirection::Descending,
        }
    }
}

/// Ordered sort keys; earlier keys take precedence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortSpec(Vec<SortKey>);

impl SortSpec {
    pub fn new(keys: Vec<SortKey>) -> Self {
        Self(keys)
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Compare two documents key by key
    pub fn compare(&self, a: &Document, b: &Document) -> Ordering {
        for key in &self.0 {
            let left = key.kind.extract(a.get(&key.field));
            let right = key.kind.extract(b.get(&key.field));
            let ordering = match key.direction {
                SortDirection::Ascending => left.sort_cmp(&right),
                SortDirection::Descending => right.sort_cmp(&left),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

/// Inclusion and exclusion are mutually exclusive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    Include(Vec<String>),
    Exclude(Vec<String>),
}

impl Default for Projection {
    fn default() -> Self {
        Projection::Exclude(vec![fields::VERSION.to_string()])
    }
}

impl Projection {
    /// Shape a stored document; `id` survives every inclusion list
    pub fn apply(&self, mut document: Document) -> Document {
        match self {
            Projection::Include(names) => {
                document.retain(|key| key == fields::ID || names.iter().any(|n| n == key));
            }
            Projection::Exclude(names) => {
                document.retain(|key| !names.iter().any(|n| n == key));
            }
        }
        document
    }
}

/// Which side of the soft-delete boundary a listing reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SoftDeleteScope {
    #[default]
    Live,
    Deleted,
}

impl SoftDeleteScope {
    /// Only the exact value `true` selects deleted documents
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("true") => SoftDeleteScope::Deleted,
            _ => SoftDeleteScope::Live,
        }
    }

    pub fn condition(self) -> Condition {
        match self {
            SoftDeleteScope::Live => Condition::is_null(fields::DELETED_AT),
            SoftDeleteScope::Deleted => Condition::is_not_null(fields::DELETED_AT),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryDescriptor {
    collection: String,
    predicate: Predicate,
    projection: Projection,
    sort: SortSpec,
}

impl QueryDescriptor {
    /// Unfiltered, unsorted query over a collection
    pub fn new(collection: &str) -> Self {
        Self {
            collection: collection.to_string(),
            predicate: Predicate::new(),
            projection: Projection::default(),
            sort: SortSpec::default(),
        }
    }

    /// Add a clause; existing clauses are kept
    pub fn where_condition(mut self, condition: Condition) -> Self {
        self.predicate = self.predicate.and(condition);
        self
    }

    /// Restrict to one side of the soft-delete boundary
    pub fn scoped(self, scope: SoftDeleteScope) -> Self {
        self.where_condition(scope.condition())
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn sort(&self) -> &SortSpec {
        &self.sort
    }
}
