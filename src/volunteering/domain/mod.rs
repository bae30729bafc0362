//! Domain model for volunteer coordination.
//!
//! Organizations own tasks, volunteers sign up for tasks, and task status is
//! derived from dates at read time. Nothing here touches storage.

mod contact;
mod error;
mod ids;
mod organization;
mod signup;
mod status;
mod task;
mod volunteer;

pub use contact::{ContactDetails, ContactUpdate, NAME_MAX_LEN, PHONE_NUMBER_MAX_LEN};
pub use error::{
    DeadlineKind, ErrorKind, ParseGenderError, ParseTaskStatusError, VolunteeringDomainError,
};
pub use ids::{OrganizationId, SignupId, TaskId, VolunteerId};
pub use organization::{
    ORGANIZATION_TEXT_MAX_LEN, Organization, OrganizationUpdate, PersistedOrganizationData,
};
pub use signup::{SignupOutcome, TaskSignup};
pub use status::{TaskStatus, derive_status};
pub use task::{
    PersistedTaskData, TASK_TEXT_MAX_LEN, Task, TaskDetails, TaskDetailsUpdate, TaskSchedule,
};
pub use volunteer::{Gender, PersistedVolunteerData, Volunteer, VolunteerUpdate};
