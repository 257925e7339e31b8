use super::schema::FieldKind;
use crate::database::Document;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use uuid::Uuid;

/// Comparison operators accepted in `field[op]=value` filters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl ComparisonOperator {
    /// Resolve the bracket suffix of a filter key; anything else is rejected
    pub fn from_bracket(op: &str) -> Option<Self> {
        match op {
            "eq" => Some(Self::Eq),
            "ne" => Some(Self::Ne),
            "gt" => Some(Self::Gt),
            "gte" => Some(Self::Gte),
            "lt" => Some(Self::Lt),
            "lte" => Some(Self::Lte),
            _ => None,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "IS DISTINCT FROM",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
        }
    }

    /// Evaluate `stored <op> expected`. Values of different kinds never
    /// satisfy an ordering comparison; a missing value only satisfies `ne`.
    pub fn evaluate(self, stored: &FieldValue, expected: &FieldValue) -> bool {
        let ordering = stored.partial_cmp_same_kind(expected);
        match self {
            Self::Eq => stored == expected,
            Self::Ne => stored != expected,
            Self::Gt => ordering == Some(Ordering::Greater),
            Self::Gte => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
            Self::Lt => ordering == Some(Ordering::Less),
            Self::Lte => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
        }
    }
}

/// A typed field value, either coerced from the query string or read from a document
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Timestamp(DateTime<Utc>),
    Id(Uuid),
}

impl FieldValue {
    fn type_rank(&self) -> u8 {
        match self {
            FieldValue::Null => 0,
            FieldValue::Number(_) => 1,
            FieldValue::Text(_) => 2,
            FieldValue::Id(_) => 3,
            FieldValue::Bool(_) => 4,
            FieldValue::Timestamp(_) => 5,
        }
    }

    fn partial_cmp_same_kind(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (FieldValue::Bool(a), FieldValue::Bool(b)) => Some(a.cmp(b)),
            (FieldValue::Number(a), FieldValue::Number(b)) => Some(a.total_cmp(b)),
            (FieldValue::Text(a), FieldValue::Text(b)) => Some(a.cmp(b)),
            (FieldValue::Timestamp(a), FieldValue::Timestamp(b)) => Some(a.cmp(b)),
            (FieldValue::Id(a), FieldValue::Id(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Total order used for sorting: nulls first, then by type, then by value
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        self.partial_cmp_same_kind(other)
            .unwrap_or_else(|| self.type_rank().cmp(&other.type_rank()))
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            FieldValue::Null => serde_json::Value::Null,
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Number(n) => serde_json::Number::from_f64(*n)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            FieldValue::Text(s) => serde_json::Value::String(s.clone()),
            FieldValue::Timestamp(ts) => serde_json::Value::String(ts.to_rfc3339()),
            FieldValue::Id(id) => serde_json::Value::String(id.to_string()),
        }
    }
}

/// A single predicate clause over one document
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Compare {
        field: String,
        kind: FieldKind,
        operator: ComparisonOperator,
        value: FieldValue,
    },
    IsNull {
        field: String,
    },
    IsNotNull {
        field: String,
    },
    /// Case-insensitive literal substring match on a text field
    Contains {
        field: String,
        needle: String,
    },
    /// Array field holds the given element
    ArrayContains {
        field: String,
        value: FieldValue,
    },
    /// Logical OR; an empty group matches nothing
    AnyOf(Vec<Condition>),
}

impl Condition {
    pub fn compare(
        field: &str,
        kind: FieldKind,
        operator: ComparisonOperator,
        value: FieldValue,
    ) -> Self {
        Condition::Compare {
            field: field.to_string(),
            kind,
            operator,
            value,
        }
    }

    pub fn is_null(field: &str) -> Self {
        Condition::IsNull {
            field: field.to_string(),
        }
    }

    pub fn is_not_null(field: &str) -> Self {
        Condition::IsNotNull {
            field: field.to_string(),
        }
    }

    pub fn contains(field: &str, needle: &str) -> Self {
        Condition::Contains {
            field: field.to_string(),
            needle: needle.to_string(),
        }
    }

    pub fn array_contains(field: &str, value: FieldValue) -> Self {
        Condition::ArrayContains {
            field: field.to_string(),
            value,
        }
    }

    /// Evaluate this clause against a stored document
    pub fn matches(&self, document: &Document) -> bool {
        match self {
            Condition::Compare {
                field,
                kind,
                operator,
                value,
            } => operator.evaluate(&kind.extract(document.get(field)), value),
            Condition::IsNull { field } => document.get(field).map_or(true, |v| v.is_null()),
            Condition::IsNotNull { field } => document.get(field).is_some_and(|v| !v.is_null()),
            Condition::Contains { field, needle } => match document.get(field) {
                Some(serde_json::Value::String(text)) => {
                    text.to_lowercase().contains(&needle.to_lowercase())
                }
                _ => false,
            },
            Condition::ArrayContains { field, value } => {
                let expected = value.to_json();
                match document.get(field) {
                    Some(serde_json::Value::Array(items)) => items.contains(&expected),
                    _ => false,
                }
            }
            Condition::AnyOf(conditions) => conditions.iter().any(|c| c.matches(document)),
        }
    }
}

/// Conjunction of every clause added to a descriptor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    clauses: Vec<Condition>,
}

impl Predicate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(mut self, condition: Condition) -> Self {
        self.clauses.push(condition);
        self
    }

    pub fn clauses(&self) -> &[Condition] {
        &self.clauses
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn matches(&self, document: &Document) -> bool {
        self.clauses.iter().all(|clause| clause.matches(document))
    }
}
