//! Errors shared by the volunteering repository ports.

use crate::volunteering::domain::{ErrorKind, OrganizationId, SignupId, TaskId, VolunteerId};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type for volunteering repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Reference to a stored record, used in repository errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityRef {
    /// An organization record.
    Organization(OrganizationId),
    /// A volunteer record.
    Volunteer(VolunteerId),
    /// A task record.
    Task(TaskId),
    /// A signup record.
    Signup(SignupId),
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Organization(id) => write!(f, "organization {id}"),
            Self::Volunteer(id) => write!(f, "volunteer {id}"),
            Self::Task(id) => write!(f, "task {id}"),
            Self::Signup(id) => write!(f, "signup {id}"),
        }
    }
}

/// Errors returned by repository implementations.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    /// The record to update or delete does not exist.
    #[error("{0} not found")]
    NotFound(EntityRef),

    /// A record with the same identifier already exists.
    #[error("duplicate {0}")]
    Duplicate(EntityRef),

    /// The volunteer already holds a signup for the task.
    #[error("volunteer {volunteer_id} is already signed up for task {task_id}")]
    DuplicateSignup {
        /// Task of the conflicting signup.
        task_id: TaskId,
        /// Volunteer of the conflicting signup.
        volunteer_id: VolunteerId,
    },

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Classifies this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Duplicate(_)
            | Self::DuplicateSignup { .. }
            | Self::InvalidPersistedData(_)
            | Self::Persistence(_) => ErrorKind::Storage,
        }
    }
}
