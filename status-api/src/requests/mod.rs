//! Request payloads and their validation into write models
//!
//! Payloads deserialize leniently (every field optional) so that a missing
//! or malformed value is reported as a validation failure naming the field
//! instead of an opaque body rejection.

mod component_groups;
mod schedules;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::handlers::{ApiError, ApiOperation};

pub use component_groups::{StoreComponentGroupRequest, UpdateComponentGroupRequest};
pub use schedules::{ScheduleComponentRequest, StoreScheduleRequest, UpdateScheduleRequest};

/// Checks a raw payload and converts it into its write model
pub trait Validate {
    type Output;

    /// # Errors
    ///
    /// A validation failure naming the first offending field.
    fn validate(self) -> Result<Self::Output, ApiError>;
}

/// Distinguish an explicit `null` (`Some(None)`) from an absent field (`None`)
pub(crate) fn some_nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn invalid(operation: ApiOperation, field: &str, message: impl Into<String>) -> ApiError {
    ApiError::invalid_parameter(field, message).with_operation(operation)
}

fn required(operation: ApiOperation, field: &str) -> ApiError {
    invalid(operation, field, format!("The {} field is required.", field))
}

/// Non-blank text, trimmed
fn text(operation: ApiOperation, field: &str, value: String) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(required(operation, field));
    }
    if trimmed.chars().count() > 255 {
        return Err(invalid(
            operation,
            field,
            format!("The {} may not be greater than 255 characters.", field),
        ));
    }
    Ok(trimmed.to_string())
}

/// RFC 3339, or `YYYY-MM-DD HH:MM[:SS]` read as UTC
fn timestamp(operation: ApiOperation, field: &str, value: &str) -> Result<DateTime<Utc>, ApiError> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            invalid(
                operation,
                field,
                format!("The {} is not a valid date.", field),
            )
        })
}

/// Integer-coded enum value
fn code<E>(operation: ApiOperation, field: &str, value: u8) -> Result<E, ApiError>
where
    E: TryFrom<u8, Error = u8>,
{
    E::try_from(value).map_err(|code| {
        invalid(
            operation,
            field,
            format!("The selected {} ({}) is invalid.", field, code),
        )
    })
}
