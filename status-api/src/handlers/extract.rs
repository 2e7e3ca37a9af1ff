//! Handler-side conversions of raw path and body input
//!
//! Bodies are taken as `Result<Json<T>, JsonRejection>` so handlers can run
//! the permission guard before any payload error is reported.

use std::str::FromStr;

use axum::extract::rejection::JsonRejection;
use axum::Json;

use super::error::{ApiError, ApiOperation};

/// Parse a path identifier; anything but a positive integer names no record
pub fn record_id<I: FromStr>(
    raw: &str,
    entity_type: &str,
    operation: ApiOperation,
) -> Result<I, ApiError> {
    raw.parse().map_err(|_| {
        ApiError::not_found(entity_type, raw).with_operation(operation)
    })
}

/// Unwrap a JSON body, reporting a malformed one as field `body`
pub fn payload<T>(
    body: Result<Json<T>, JsonRejection>,
    operation: ApiOperation,
) -> Result<T, ApiError> {
    body.map(|Json(value)| value).map_err(|rejection| {
        ApiError::invalid_parameter("body", rejection.body_text()).with_operation(operation)
    })
}
