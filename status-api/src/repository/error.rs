//! Repository error types
//!
//! Every storage call reports failure as a [`RepositoryError`] carrying the
//! operation that failed and, where known, the entity involved.
//!
//! ```rust
//! use status_api::repository::{RepositoryError, RepositoryErrorKind};
//!
//! let error = RepositoryError::not_found("schedule", "42");
//! assert!(matches!(error.kind, RepositoryErrorKind::NotFound));
//! ```

use std::fmt;

/// Operation being performed when the repository error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryOperation {
    /// Loading one record by identifier
    FindById,
    /// Listing records with filters, ordering and a row window
    FindAll,
    /// Inserting a record
    Create,
    /// Patching a record
    Update,
    /// Removing a record
    Delete,
}

impl fmt::Display for RepositoryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FindById => write!(f, "find_by_id"),
            Self::FindAll => write!(f, "find_all"),
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Category of repository error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryErrorKind {
    /// Record does not exist
    NotFound,
    /// A referenced record does not exist (dangling foreign key)
    ConstraintViolation,
    /// Storage backend failed while executing the operation
    DatabaseError,
}

impl fmt::Display for RepositoryErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::ConstraintViolation => write!(f, "constraint_violation"),
            Self::DatabaseError => write!(f, "database_error"),
        }
    }
}

/// Structured repository error with operation context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryError {
    /// The operation being performed when the error occurred
    pub operation: RepositoryOperation,
    /// The category of error
    pub kind: RepositoryErrorKind,
    /// Human-readable error message
    pub message: String,
    /// Resource type involved, e.g. `"schedule"`
    pub entity_type: Option<String>,
    /// Identifier of the record involved
    pub entity_id: Option<String>,
}

impl RepositoryError {
    pub fn new(
        operation: RepositoryOperation,
        kind: RepositoryErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            entity_type: None,
            entity_id: None,
        }
    }

    /// Record `entity_id` of `entity_type` does not exist
    pub fn not_found(entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self::new(
            RepositoryOperation::FindById,
            RepositoryErrorKind::NotFound,
            "Entity not found",
        )
        .with_entity(entity_type, entity_id)
    }

    /// A write referenced a record that does not exist
    pub fn constraint_violation(
        operation: RepositoryOperation,
        message: impl Into<String>,
    ) -> Self {
        Self::new(operation, RepositoryErrorKind::ConstraintViolation, message)
    }

    pub fn database_error(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::DatabaseError, message)
    }

    #[must_use]
    pub fn with_entity(
        mut self,
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
    ) -> Self {
        self.entity_type = Some(entity_type.into());
        self.entity_id = Some(entity_id.into());
        self
    }

    #[must_use]
    pub fn with_operation(mut self, operation: RepositoryOperation) -> Self {
        self.operation = operation;
        self
    }

    /// Whether the error names a missing record rather than a storage fault
    pub fn is_not_found(&self) -> bool {
        self.kind == RepositoryErrorKind::NotFound
    }
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Repository {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        if let (Some(entity_type), Some(entity_id)) = (&self.entity_type, &self.entity_id) {
            write!(f, " [{}: {}]", entity_type, entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for RepositoryError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_carries_entity() {
        let error = RepositoryError::not_found("component_group", "7");
        assert_eq!(error.operation, RepositoryOperation::FindById);
        assert!(error.is_not_found());
        assert_eq!(error.entity_type.as_deref(), Some("component_group"));
        assert_eq!(error.entity_id.as_deref(), Some("7"));
    }

    #[test]
    fn test_with_operation_overrides() {
        let error =
            RepositoryError::not_found("schedule", "3").with_operation(RepositoryOperation::Delete);
        assert_eq!(error.operation, RepositoryOperation::Delete);
        assert!(error.is_not_found());
    }

    #[test]
    fn test_constraint_violation_is_not_not_found() {
        let error = RepositoryError::constraint_violation(
            RepositoryOperation::Update,
            "component 99 does not exist",
        );
        assert_eq!(error.kind, RepositoryErrorKind::ConstraintViolation);
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_display_with_and_without_entity() {
        let plain = RepositoryError::database_error(RepositoryOperation::Create, "disk full");
        let display = plain.to_string();
        assert!(display.contains("database_error"));
        assert!(display.contains("create"));
        assert!(!display.contains('['));

        let scoped = RepositoryError::not_found("schedule", "12").to_string();
        assert!(scoped.contains("[schedule: 12]"));
    }
}
