//! Response envelopes for REST handlers
//!
//! Single records render as `{ "data": ... }`; listings add a simple
//! pagination `meta` block without totals.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::query::Page;
use crate::resources::{Present, ResourceObject};

/// Single item response wrapper
#[derive(Debug, Clone, Serialize)]
pub struct ItemResponse<T> {
    pub data: T,
}

impl<T> ItemResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

impl ItemResponse<ResourceObject> {
    /// Present one entity
    pub fn present(entity: &impl Present) -> Self {
        Self::new(entity.present())
    }
}

impl<T: Serialize> IntoResponse for ItemResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Simple pagination metadata.
///
/// `from`/`to` are 1-based item positions and `null` on an empty page.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct PageMeta {
    pub current_page: u64,
    pub per_page: u64,
    pub from: Option<u64>,
    pub to: Option<u64>,
    pub has_more_pages: bool,
}

impl<T> From<&Page<T>> for PageMeta {
    fn from(page: &Page<T>) -> Self {
        Self {
            current_page: page.current_page,
            per_page: page.per_page,
            from: page.from(),
            to: page.to(),
            has_more_pages: page.has_more,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T> ListResponse<T> {
    pub fn new(page: Page<T>) -> Self {
        let meta = PageMeta::from(&page);
        Self {
            data: page.items,
            meta,
        }
    }
}

impl ListResponse<ResourceObject> {
    /// Present every entity on a page
    pub fn present<E: Present>(page: Page<E>) -> Self {
        Self::new(page.map(|entity| entity.present()))
    }
}

impl<T: Serialize> IntoResponse for ListResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// `204 No Content`
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> Response {
        StatusCode::NO_CONTENT.into_response()
    }
}
