//! Port contracts for volunteering persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by the volunteering
//! services. One port per aggregate; all share [`RepositoryError`].

mod error;
pub mod organization;
pub mod signup;
pub mod task;
pub mod volunteer;

pub use error::{EntityRef, RepositoryError, RepositoryResult};
pub use organization::OrganizationRepository;
pub use signup::SignupRepository;
pub use task::TaskRepository;
pub use volunteer::VolunteerRepository;

#[cfg(test)]
pub use organization::MockOrganizationRepository;
#[cfg(test)]
pub use signup::MockSignupRepository;
#[cfg(test)]
pub use task::MockTaskRepository;
#[cfg(test)]
pub use volunteer::MockVolunteerRepository;
