//! Per-resource field allowlists.
//!
//! Every stage that reads a field name out of the query string resolves it
//! here first; names that do not resolve never reach a descriptor.

use super::conditions::FieldValue;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// Storage type of a document field, used for coercion and comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Boolean,
    Number,
    Timestamp,
    Id,
    IdList,
}

impl FieldKind {
    /// Coerce a raw query-string value. `None` means the value is unusable for
    /// this kind and the clause must be dropped.
    pub fn coerce(self, raw: &str) -> Option<FieldValue> {
        match self {
            FieldKind::Text => Some(FieldValue::Text(raw.to_string())),
            FieldKind::Boolean => match raw.trim() {
                "true" => Some(FieldValue::Bool(true)),
                "false" => Some(FieldValue::Bool(false)),
                _ => None,
            },
            FieldKind::Number => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(FieldValue::Number),
            FieldKind::Timestamp => parse_timestamp(raw.trim()).map(FieldValue::Timestamp),
            FieldKind::Id | FieldKind::IdList => {
                Uuid::parse_str(raw.trim()).ok().map(FieldValue::Id)
            }
        }
    }

    /// Read a stored JSON value as this kind; anything unreadable is `Null`
    pub fn extract(self, value: Option<&serde_json::Value>) -> FieldValue {
        let Some(value) = value else {
            return FieldValue::Null;
        };
        match (self, value) {
            (_, serde_json::Value::Null) => FieldValue::Null,
            (FieldKind::Text, serde_json::Value::String(s)) => FieldValue::Text(s.clone()),
            (FieldKind::Boolean, serde_json::Value::Bool(b)) => FieldValue::Bool(*b),
            (FieldKind::Number, serde_json::Value::Number(n)) => {
                n.as_f64().map_or(FieldValue::Null, FieldValue::Number)
            }
            (FieldKind::Timestamp, serde_json::Value::String(s)) => {
                parse_timestamp(s).map_or(FieldValue::Null, FieldValue::Timestamp)
            }
            (FieldKind::Id, serde_json::Value::String(s)) => {
                Uuid::parse_str(s).map_or(FieldValue::Null, FieldValue::Id)
            }
            _ => FieldValue::Null,
        }
    }
}

/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (midnight UTC)
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub filterable: bool,
    pub sortable: bool,
    pub selectable: bool,
}

impl FieldSpec {
    /// Filterable, sortable and selectable
    pub const fn queryable(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            filterable: true,
            sortable: true,
            selectable: true,
        }
    }

    /// Filterable and selectable, not sortable
    pub const fn filter_only(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            filterable: true,
            sortable: false,
            selectable: true,
        }
    }

    /// Selectable only
    pub const fn select_only(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            filterable: false,
            sortable: false,
            selectable: true,
        }
    }
}

/// The set of fields a resource exposes to listing queries
#[derive(Debug, Clone, Copy)]
pub struct FieldSchema {
    pub collection: &'static str,
    pub fields: &'static [FieldSpec],
}

impl FieldSchema {
    pub const fn new(collection: &'static str, fields: &'static [FieldSpec]) -> Self {
        Self { collection, fields }
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }

    pub fn filterable(&self, name: &str) -> Option<&FieldSpec> {
        self.get(name).filter(|spec| spec.filterable)
    }

    pub fn sortable(&self, name: &str) -> Option<&FieldSpec> {
        self.get(name).filter(|spec| spec.sortable)
    }

    pub fn selectable(&self, name: &str) -> Option<&FieldSpec> {
        self.get(name).filter(|spec| spec.selectable)
    }
}
