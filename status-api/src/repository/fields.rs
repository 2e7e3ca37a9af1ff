//! Field access used by storage backends to filter and order records by name

use std::cmp::Ordering;

use chrono::{DateTime, SecondsFormat, Utc};

/// Dynamically typed value of a named record field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Null,
    Integer(i64),
    Text(String),
    Timestamp(DateTime<Utc>),
    Bool(bool),
}

impl FieldValue {
    /// String form used by filter predicates. `None` for null.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Integer(n) => Some(n.to_string()),
            Self::Text(s) => Some(s.clone()),
            Self::Timestamp(t) => Some(t.to_rfc3339_opts(SecondsFormat::Secs, true)),
            Self::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Integer(_) => 2,
            Self::Timestamp(_) => 3,
            Self::Text(_) => 4,
        }
    }

    /// Ascending sort order: nulls first, text compared case-insensitively.
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a.cmp(b),
            (Self::Timestamp(a), Self::Timestamp(b)) => a.cmp(b),
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl From<Option<DateTime<Utc>>> for FieldValue {
    fn from(value: Option<DateTime<Utc>>) -> Self {
        value.map_or(Self::Null, Self::Timestamp)
    }
}

/// A record whose fields can be read by name.
///
/// Unknown names read as [`FieldValue::Null`]; callers only ever ask for
/// names from a resource allow-list.
pub trait Queryable {
    fn key(&self) -> u64;

    fn field(&self, name: &str) -> FieldValue;
}
