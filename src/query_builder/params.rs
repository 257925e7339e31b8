//! Raw query-string parameters and their typed, allowlisted form.

use super::conditions::{ComparisonOperator, FieldValue};
use super::descriptor::{SoftDeleteScope, SortKey};
use super::schema::{FieldKind, FieldSchema};
use crate::constants::params;
use serde::Deserialize;
use tracing::debug;

/// Untrusted `(key, value)` pairs exactly as they appeared in the query string
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct RawParams(Vec<(String, String)>);

impl RawParams {
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Last occurrence wins for single-valued options
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One validated `field[op]=value` filter
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    pub field: &'static str,
    pub kind: FieldKind,
    pub operator: ComparisonOperator,
    pub value: FieldValue,
}

/// Typed listing options. Every field name in here has already been resolved
/// against the resource's [`FieldSchema`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub sort: Option<Vec<SortKey>>,
    pub fields: Option<Vec<String>>,
    pub search: Option<String>,
    pub deleted: SoftDeleteScope,
    pub filters: Vec<FieldFilter>,
}

impl ListQuery {
    /// Parse raw parameters. Never fails: unusable entries are dropped.
    pub fn parse(raw: &RawParams, schema: &FieldSchema) -> Self {
        let per_page = raw
            .get(params::PER_PAGE)
            .and_then(parse_positive)
            .or_else(|| raw.get(params::LIMIT).and_then(parse_positive));

        Self {
            page: raw.get(params::PAGE).and_then(parse_positive),
            per_page,
            sort: raw
                .get(params::SORT)
                .and_then(|value| parse_sort(value, schema)),
            fields: raw
                .get(params::FIELDS)
                .and_then(|value| parse_fields(value, schema)),
            search: raw
                .get(params::SEARCH)
                .map(str::trim)
                .filter(|term| !term.is_empty())
                .map(str::to_string),
            deleted: SoftDeleteScope::from_param(raw.get(params::DELETED)),
            filters: parse_filters(raw, schema),
        }
    }
}

/// Integers ≥ 1 only; everything else falls back to the caller's default
fn parse_positive(value: &str) -> Option<u32> {
    match value.trim().parse::<u32>() {
        Ok(n) if n >= 1 => Some(n),
        _ => {
            debug!(value = %value, "Ignoring unusable pagination value");
            None
        }
    }
}

fn parse_sort(value: &str, schema: &FieldSchema) -> Option<Vec<SortKey>> {
    let mut keys: Vec<SortKey> = Vec::new();
    for token in value.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let (name, descending) = match token.strip_prefix('-') {
            Some(name) => (name, true),
            None => (token, false),
        };
        let Some(spec) = schema.sortable(name) else {
            debug!(field = %name, collection = schema.collection, "Ignoring unsortable field");
            continue;
        };
        if keys.iter().any(|key| key.field == spec.name) {
            continue;
        }
        keys.push(if descending {
            SortKey::descending(spec.name, spec.kind)
        } else {
            SortKey::ascending(spec.name, spec.kind)
        });
    }
    (!keys.is_empty()).then_some(keys)
}

fn parse_fields(value: &str, schema: &FieldSchema) -> Option<Vec<String>> {
    let mut selected: Vec<String> = Vec::new();
    for name in value.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        match schema.selectable(name) {
            Some(spec) if !selected.iter().any(|s| s == spec.name) => {
                selected.push(spec.name.to_string());
            }
            Some(_) => {}
            None => {
                debug!(field = %name, collection = schema.collection, "Ignoring unselectable field");
            }
        }
    }
    (!selected.is_empty()).then_some(selected)
}

/// Split `field[op]` into its parts. A bare key is an equality filter.
fn parse_filter_key(key: &str) -> Option<(&str, ComparisonOperator)> {
    match key.split_once('[') {
        None => {
            if key.contains(']') {
                None
            } else {
                Some((key, ComparisonOperator::Eq))
            }
        }
        Some((field, rest)) => {
            let op = rest.strip_suffix(']')?;
            if field.is_empty() || op.contains('[') || op.contains(']') {
                return None;
            }
            ComparisonOperator::from_bracket(op).map(|operator| (field, operator))
        }
    }
}

fn parse_filters(raw: &RawParams, schema: &FieldSchema) -> Vec<FieldFilter> {
    let mut filters = Vec::new();
    for (key, value) in raw.iter() {
        if params::is_reserved(key) {
            continue;
        }
        let Some((name, operator)) = parse_filter_key(key) else {
            debug!(key = %key, "Ignoring malformed filter key");
            continue;
        };
        let Some(spec) = schema.filterable(name) else {
            debug!(field = %name, collection = schema.collection, "Ignoring unfilterable field");
            continue;
        };
        let Some(value) = spec.kind.coerce(value) else {
            debug!(field = %name, value = %value, "Ignoring filter value of the wrong kind");
            continue;
        };
        filters.push(FieldFilter {
            field: spec.name,
            kind: spec.kind,
            operator,
            value,
        });
    }
    filters
}
