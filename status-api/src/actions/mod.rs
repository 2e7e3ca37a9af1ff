//! Side effects behind every mutating endpoint
//!
//! One struct per entity and verb. Handlers resolve the target and validate
//! the payload first; an action only talks to its repository.

mod component_groups;
mod schedules;

use crate::handlers::ApiError;
use crate::repository::{RepositoryError, RepositoryErrorKind};

pub use component_groups::{CreateComponentGroup, DeleteComponentGroup, UpdateComponentGroup};
pub use schedules::{CreateSchedule, DeleteSchedule, UpdateSchedule};

#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("{field}: {message}")]
    Invalid { field: &'static str, message: String },
}

impl ActionError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }
}

impl From<ActionError> for ApiError {
    fn from(error: ActionError) -> Self {
        match error {
            ActionError::Repository(err) if err.kind == RepositoryErrorKind::ConstraintViolation => {
                let mut api = ApiError::invalid_parameter("components", err.message);
                api.entity_type = err.entity_type;
                api.entity_id = err.entity_id;
                api
            }
            ActionError::Repository(err) => ApiError::from(err),
            ActionError::Invalid { field, message } => ApiError::invalid_parameter(field, message),
        }
    }
}
