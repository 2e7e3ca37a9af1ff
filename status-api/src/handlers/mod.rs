//! REST handlers for component groups and schedules
//!
//! Every endpoint follows the same order: permission guard, payload
//! validation, record resolution, action, presenter. Errors surface as
//! [`ApiError`] and render with a stable JSON shape.

pub mod component_groups;
mod error;
mod extract;
mod response;
pub mod schedules;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{ApiError, ApiErrorKind, ApiOperation};
pub use extract::{payload, record_id};
pub use response::{ItemResponse, ListResponse, NoContent, PageMeta};
