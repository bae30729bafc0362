//! In-memory repositories for tests and single-process use.
//!
//! Each repository keeps its records behind an `Arc<RwLock<_>>`, so clones
//! share state.

mod organization;
mod signup;
mod task;
mod volunteer;

pub use organization::InMemoryOrganizationRepository;
pub use signup::InMemorySignupRepository;
pub use task::InMemoryTaskRepository;
pub use volunteer::InMemoryVolunteerRepository;

use crate::volunteering::ports::RepositoryError;
use std::fmt::Display;

/// Maps a poisoned lock into a persistence error.
fn lock_poisoned(err: impl Display) -> RepositoryError {
    RepositoryError::persistence(std::io::Error::other(err.to_string()))
}
