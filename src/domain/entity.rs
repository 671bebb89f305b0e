//! Domain Layer - Core Entity Trait
//!
//! This trait defines the basic contract for all domain entities.
//! All entities carry a store-assigned identifier and are thread-safe.

use thiserror::Error;

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier
    type Id: Copy + Eq + std::hash::Hash + Send + Sync + std::fmt::Display;

    /// Field values supplied on create; the identifier is generated by the store
    type Draft: Send + Sync;

    /// Mutable field values supplied on update; never carries a parent reference
    type Patch: Send + Sync;

    /// Lowercase entity name used in errors and logs
    const KIND: &'static str;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A required field was missing or malformed
    #[error("validation failed: {0}")]
    Validation(String),

    /// No live record with the given identifier
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// The store could not be reached or has been closed
    #[error("connection error: {0}")]
    Connection(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<rusqlite::Error> for DomainError {
    fn from(err: rusqlite::Error) -> Self {
        use rusqlite::ErrorCode;

        match &err {
            rusqlite::Error::SqliteFailure(e, _) => match e.code {
                ErrorCode::ConstraintViolation => DomainError::Validation(err.to_string()),
                ErrorCode::CannotOpen | ErrorCode::NotADatabase | ErrorCode::PermissionDenied => {
                    DomainError::Connection(err.to_string())
                }
                _ => DomainError::Internal(err.to_string()),
            },
            _ => DomainError::Internal(err.to_string()),
        }
    }
}

/// Reject a required text field that is empty
pub(crate) fn require_text(field: &str, value: &str) -> DomainResult<()> {
    if value.is_empty() {
        return Err(DomainError::Validation(format!("{} is required", field)));
    }
    Ok(())
}
