//! Application services for task lifecycle, signups and the directory.

mod cascade;
mod directory;
mod lifecycle;
mod signup;

pub use cascade::{CascadeDeletionPolicy, CascadeError, CascadeReport, CascadeResult};
pub use directory::{
    DirectoryError, DirectoryResult, DirectoryService, RegisterOrganizationRequest,
    RegisterVolunteerRequest,
};
pub use lifecycle::{
    CreateTaskRequest, TaskDates, TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService,
    UpdateTaskRequest,
};
pub use signup::{SignupCoordinator, SignupError, SignupResult};
