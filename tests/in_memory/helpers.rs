//! Shared wiring for in-memory integration tests.

use crate::test_helpers::{SteppedClock, days_after};
use rstest::fixture;
use std::sync::Arc;
use volunteer_platform::volunteering::{
    adapters::memory::{
        InMemoryOrganizationRepository, InMemorySignupRepository, InMemoryTaskRepository,
        InMemoryVolunteerRepository,
    },
    domain::{Organization, Task, Volunteer},
    services::{
        CreateTaskRequest, DirectoryService, RegisterOrganizationRequest,
        RegisterVolunteerRequest, SignupCoordinator, TaskDates, TaskLifecycleService,
    },
};

/// Task lifecycle service over in-memory stores.
pub type Lifecycle = TaskLifecycleService<
    InMemoryOrganizationRepository,
    InMemoryTaskRepository,
    InMemorySignupRepository,
    SteppedClock,
>;

/// Signup coordinator over in-memory stores.
pub type Coordinator = SignupCoordinator<
    InMemoryTaskRepository,
    InMemoryVolunteerRepository,
    InMemorySignupRepository,
    SteppedClock,
>;

/// Directory service over in-memory stores.
pub type Directory = DirectoryService<
    InMemoryOrganizationRepository,
    InMemoryVolunteerRepository,
    InMemoryTaskRepository,
    InMemorySignupRepository,
    SteppedClock,
>;

/// The three services sharing one set of stores and one clock.
pub struct Platform {
    pub clock: SteppedClock,
    pub lifecycle: Lifecycle,
    pub coordinator: Coordinator,
    pub directory: Directory,
}

impl Platform {
    /// Wires fresh stores to all services.
    pub fn new(clock: SteppedClock) -> Self {
        let organizations = Arc::new(InMemoryOrganizationRepository::new());
        let volunteers = Arc::new(InMemoryVolunteerRepository::new());
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let signups = Arc::new(InMemorySignupRepository::new());
        let shared_clock = Arc::new(clock.clone());
        Self {
            lifecycle: TaskLifecycleService::new(
                Arc::clone(&organizations),
                Arc::clone(&tasks),
                Arc::clone(&signups),
                Arc::clone(&shared_clock),
            ),
            coordinator: SignupCoordinator::new(
                Arc::clone(&tasks),
                Arc::clone(&volunteers),
                Arc::clone(&signups),
                Arc::clone(&shared_clock),
            ),
            directory: DirectoryService::new(
                organizations,
                volunteers,
                tasks,
                signups,
                shared_clock,
            ),
            clock,
        }
    }

    /// Registers an organization with fixed contact data.
    ///
    /// # Errors
    ///
    /// Returns an error if registration fails.
    pub async fn organization(&self, name: &str) -> Result<Organization, eyre::Report> {
        let slug = name.to_lowercase().replace(' ', "-");
        Ok(self
            .directory
            .register_organization(RegisterOrganizationRequest::new(
                name,
                format!("contact@{slug}.example.org"),
                "0201234567",
                "1 High Street",
                format!("https://{slug}.example.org"),
            ))
            .await?)
    }

    /// Registers a volunteer with fixed contact data.
    ///
    /// # Errors
    ///
    /// Returns an error if registration fails.
    pub async fn volunteer(&self, name: &str) -> Result<Volunteer, eyre::Report> {
        Ok(self
            .directory
            .register_volunteer(RegisterVolunteerRequest::new(
                name,
                format!("{}@example.org", name.to_lowercase()),
                "0123456789",
            ))
            .await?)
    }

    /// Creates a task with event at +30 days, application deadline at +10
    /// days and cancellation deadline at +5 days.
    ///
    /// # Errors
    ///
    /// Returns an error if task creation fails.
    pub async fn standard_task(&self, organization: &Organization) -> Result<Task, eyre::Report> {
        let today = self.clock.today();
        let dates = TaskDates {
            event_date: days_after(today, 30),
            application_deadline: days_after(today, 10),
            cancellation_deadline: days_after(today, 5),
        };
        Ok(self
            .lifecycle
            .create_task(CreateTaskRequest::new(
                organization.id(),
                "Food bank shift",
                "Sort and pack donations",
                "Warehouse 3",
                dates,
            ))
            .await?)
    }
}

/// Provides a platform over fresh stores and a fixed clock.
#[fixture]
pub fn platform() -> Platform {
    Platform::new(SteppedClock::fixed())
}
