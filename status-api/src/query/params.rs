//! Raw list parameters as sent by the client
//!
//! Values are kept as strings; the builder validates them against a
//! resource allow-list so errors can name the exact parameter.

use std::collections::BTreeMap;

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;

use crate::handlers::ApiError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub page: Option<String>,
    pub per_page: Option<String>,
    /// Comma-separated sort fields, `-` prefix for descending
    pub sort: Option<String>,
    /// Comma-separated relation names
    pub include: Option<String>,
    /// `filters[key]=value` pairs keyed by `key`
    pub filters: BTreeMap<String, String>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect recognised parameters from decoded query-string pairs.
    ///
    /// Unrecognised top-level parameters are ignored. A recognised parameter
    /// given twice is rejected so no value is silently dropped.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, ApiError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "page" => set_once(&mut params.page, &key, value)?,
                "per_page" => set_once(&mut params.per_page, &key, value)?,
                "sort" => set_once(&mut params.sort, &key, value)?,
                "include" => set_once(&mut params.include, &key, value)?,
                _ => {
                    if let Some(rest) = key.strip_prefix("filters[") {
                        let name = rest
                            .strip_suffix(']')
                            .filter(|name| !name.is_empty())
                            .ok_or_else(|| {
                                ApiError::invalid_parameter(
                                    key.clone(),
                                    "filters must be given as filters[field]=value",
                                )
                            })?;
                        if params.filters.insert(name.to_string(), value).is_some() {
                            return Err(repeated(&key));
                        }
                    }
                }
            }
        }
        Ok(params)
    }

    #[must_use]
    pub fn with_page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }

    #[must_use]
    pub fn with_per_page(mut self, per_page: impl Into<String>) -> Self {
        self.per_page = Some(per_page.into());
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    #[must_use]
    pub fn with_include(mut self, include: impl Into<String>) -> Self {
        self.include = Some(include.into());
        self
    }

    #[must_use]
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }
}

fn repeated(key: &str) -> ApiError {
    ApiError::invalid_parameter(key, format!("`{key}` may only be given once"))
}

fn set_once(slot: &mut Option<String>, key: &str, value: String) -> Result<(), ApiError> {
    if slot.is_some() {
        return Err(repeated(key));
    }
    *slot = Some(value);
    Ok(())
}

impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map_err(|rejection| ApiError::invalid_parameter("query", rejection.body_text()))?;
        Self::from_pairs(pairs)
    }
}
