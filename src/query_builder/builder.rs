use super::conditions::Condition;
use super::descriptor::{Projection, QueryDescriptor, SortKey, SortSpec};
use super::params::ListQuery;
use super::schema::FieldKind;
use crate::constants::fields;
use tracing::debug;

/// Refines a caller-scoped descriptor with the options of one listing request.
///
/// Stages consume and return the builder and are meant to run in the order
/// `filter → sort → limit_fields → search`. Every stage only adds to the
/// predicate; sort and projection are replaced wholesale.
#[derive(Debug, Clone)]
pub struct QueryBuilder<'q> {
    descriptor: QueryDescriptor,
    query: &'q ListQuery,
}

impl<'q> QueryBuilder<'q> {
    pub fn new(descriptor: QueryDescriptor, query: &'q ListQuery) -> Self {
        Self { descriptor, query }
    }

    /// AND one clause per validated field filter
    pub fn filter(mut self) -> Self {
        for filter in &self.query.filters {
            self.descriptor = self.descriptor.where_condition(Condition::compare(
                filter.field,
                filter.kind,
                filter.operator,
                filter.value.clone(),
            ));
        }
        self
    }

    /// Requested order, or newest first; `id` always breaks ties
    pub fn sort(mut self) -> Self {
        let mut keys = match &self.query.sort {
            Some(keys) => keys.clone(),
            None => vec![SortKey::descending(fields::CREATED_AT, FieldKind::Timestamp)],
        };
        if !keys.iter().any(|key| key.field == fields::ID) {
            keys.push(SortKey::ascending(fields::ID, FieldKind::Id));
        }
        self.descriptor = self.descriptor.with_sort(SortSpec::new(keys));
        self
    }

    /// Project to the requested fields, or everything but the version field
    pub fn limit_fields(mut self) -> Self {
        let projection = match &self.query.fields {
            Some(names) => Projection::Include(
                names
                    .iter()
                    .filter(|name| name.as_str() != fields::VERSION)
                    .cloned()
                    .collect(),
            ),
            None => Projection::default(),
        };
        self.descriptor = self.descriptor.with_projection(projection);
        self
    }

    /// OR of substring matches across `searchable`, ANDed with earlier clauses.
    /// `searchable` comes from the caller, never from the request.
    pub fn search<S: AsRef<str>>(mut self, searchable: &[S]) -> Self {
        let Some(term) = self.query.search.as_deref() else {
            return self;
        };
        if searchable.is_empty() {
            debug!(collection = %self.descriptor.collection(), "Search requested without searchable fields");
            return self;
        }
        let group = searchable
            .iter()
            .map(|field| Condition::contains(field.as_ref(), term))
            .collect();
        self.descriptor = self.descriptor.where_condition(Condition::AnyOf(group));
        self
    }

    pub fn build(self) -> QueryDescriptor {
        self.descriptor
    }
}

/// Run every stage in order
pub fn refine<S: AsRef<str>>(
    base: QueryDescriptor,
    query: &ListQuery,
    searchable: &[S],
) -> QueryDescriptor {
    QueryBuilder::new(base, query)
        .filter()
        .sort()
        .limit_fields()
        .search(searchable)
        .build()
}
