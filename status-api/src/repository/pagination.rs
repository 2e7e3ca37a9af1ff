//! Ordering, row windows and filter predicates for repository reads

use std::fmt;

use super::fields::FieldValue;

/// Sort direction for ordered queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    #[default]
    Ascending,
    Descending,
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "asc"),
            Self::Descending => write!(f, "desc"),
        }
    }
}

/// One ordering term. Field names are always taken from a resource allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub field: &'static str,
    pub direction: OrderDirection,
}

impl OrderBy {
    pub const fn asc(field: &'static str) -> Self {
        Self {
            field,
            direction: OrderDirection::Ascending,
        }
    }

    pub const fn desc(field: &'static str) -> Self {
        Self {
            field,
            direction: OrderDirection::Descending,
        }
    }
}

/// Row window for limiting query results
///
/// ```rust
/// use status_api::repository::Pagination;
///
/// let third = Pagination::page(3, 15);
/// assert_eq!(third.offset, 30);
/// assert_eq!(third.limit, 15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Number of rows to skip
    pub offset: u64,
    /// Maximum number of rows to return
    pub limit: u64,
}

impl Pagination {
    pub const fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }

    /// Window for 1-indexed `page_number`. Page 0 is treated as page 1.
    pub const fn page(page_number: u64, page_size: u64) -> Self {
        let page = if page_number == 0 { 1 } else { page_number };
        Self {
            offset: (page - 1).saturating_mul(page_size),
            limit: page_size,
        }
    }

    /// Same window, one extra row wide.
    ///
    /// Simple pagination reads one row past the page to learn whether a next
    /// page exists without counting the whole collection.
    pub const fn with_lookahead(self) -> Self {
        Self {
            offset: self.offset,
            limit: self.limit.saturating_add(1),
        }
    }
}

/// Comparison operator of a [`FilterCondition`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    /// Exact string equality
    Equal,
    /// Exact equality with any of a list
    In,
    /// Case-insensitive substring match, any of a list when given several
    Like,
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equal => write!(f, "="),
            Self::In => write!(f, "IN"),
            Self::Like => write!(f, "LIKE"),
        }
    }
}

/// Right-hand side of a filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    List(Vec<String>),
}

impl FilterValue {
    fn as_slice(&self) -> &[String] {
        match self {
            Self::Text(value) => std::slice::from_ref(value),
            Self::List(values) => values,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

/// A single filter predicate. Multiple conditions are ANDed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCondition {
    pub field: &'static str,
    pub operator: FilterOperator,
    pub value: FilterValue,
}

impl FilterCondition {
    pub fn new(field: &'static str, operator: FilterOperator, value: FilterValue) -> Self {
        Self {
            field,
            operator,
            value,
        }
    }

    pub fn eq(field: &'static str, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOperator::Equal, value.into())
    }

    pub fn in_list(field: &'static str, values: Vec<String>) -> Self {
        Self::new(field, FilterOperator::In, FilterValue::List(values))
    }

    /// Substring match on `needle`, or on any element when given a list
    pub fn like(field: &'static str, needle: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOperator::Like, needle.into())
    }

    /// Evaluate the predicate against a record's field value.
    ///
    /// Null never matches.
    pub fn matches(&self, value: &FieldValue) -> bool {
        let Some(haystack) = value.as_text() else {
            return false;
        };
        let candidates = self.value.as_slice();
        match self.operator {
            FilterOperator::Equal | FilterOperator::In => {
                candidates.iter().any(|candidate| *candidate == haystack)
            }
            FilterOperator::Like => {
                let haystack = haystack.to_lowercase();
                candidates
                    .iter()
                    .any(|needle| haystack.contains(&needle.to_lowercase()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_offsets() {
        assert_eq!(Pagination::page(1, 15), Pagination::new(0, 15));
        assert_eq!(Pagination::page(2, 2), Pagination::new(2, 2));
        assert_eq!(Pagination::page(0, 10), Pagination::new(0, 10));
    }

    #[test]
    fn test_lookahead_widens_by_one() {
        let window = Pagination::page(2, 2).with_lookahead();
        assert_eq!(window.offset, 2);
        assert_eq!(window.limit, 3);
    }

    #[test]
    fn test_like_is_case_insensitive_substring() {
        let filter = FilterCondition::like("name", "maint");
        assert!(filter.matches(&FieldValue::Text("Database Maintenance".into())));
        assert!(!filter.matches(&FieldValue::Text("Upgrade".into())));
    }

    #[test]
    fn test_like_list_matches_any() {
        let filter = FilterCondition::like("name", vec!["db".to_string(), "web".to_string()]);
        assert!(filter.matches(&FieldValue::Text("Webserver".into())));
        assert!(filter.matches(&FieldValue::Text("Primary DB".into())));
        assert!(!filter.matches(&FieldValue::Text("Mail".into())));
    }

    #[test]
    fn test_exact_compares_text_form() {
        let filter = FilterCondition::eq("status", "1");
        assert!(filter.matches(&FieldValue::Integer(1)));
        assert!(!filter.matches(&FieldValue::Integer(10)));

        let any_of = FilterCondition::in_list("status", vec!["0".into(), "2".into()]);
        assert!(any_of.matches(&FieldValue::Integer(2)));
        assert!(!any_of.matches(&FieldValue::Integer(1)));
    }

    #[test]
    fn test_null_never_matches() {
        assert!(!FilterCondition::like("name", "").matches(&FieldValue::Null));
        assert!(!FilterCondition::eq("status", "").matches(&FieldValue::Null));
    }
}
