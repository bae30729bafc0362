//! Shared world state for signup deadline scenarios.

use crate::test_helpers::SteppedClock;
use rstest::fixture;
use std::collections::HashMap;
use std::sync::Arc;
use volunteer_platform::volunteering::{
    adapters::memory::{
        InMemoryOrganizationRepository, InMemorySignupRepository, InMemoryTaskRepository,
        InMemoryVolunteerRepository,
    },
    domain::{Organization, SignupOutcome, Task, Volunteer},
    services::{DirectoryService, SignupCoordinator, SignupError, TaskLifecycleService},
};

/// Task lifecycle service used by the BDD world.
pub type TestLifecycle = TaskLifecycleService<
    InMemoryOrganizationRepository,
    InMemoryTaskRepository,
    InMemorySignupRepository,
    SteppedClock,
>;

/// Signup coordinator used by the BDD world.
pub type TestCoordinator = SignupCoordinator<
    InMemoryTaskRepository,
    InMemoryVolunteerRepository,
    InMemorySignupRepository,
    SteppedClock,
>;

/// Directory service used by the BDD world.
pub type TestDirectory = DirectoryService<
    InMemoryOrganizationRepository,
    InMemoryVolunteerRepository,
    InMemoryTaskRepository,
    InMemorySignupRepository,
    SteppedClock,
>;

/// Scenario world for signup deadline behaviour tests.
pub struct SignupWorld {
    pub clock: SteppedClock,
    pub lifecycle: TestLifecycle,
    pub coordinator: TestCoordinator,
    pub directory: TestDirectory,
    pub organization: Option<Organization>,
    pub event_in_days: u64,
    pub task: Option<Task>,
    pub volunteers: HashMap<String, Volunteer>,
    pub signup_outcomes: Vec<SignupOutcome>,
    pub withdrawal_succeeded: bool,
    pub last_error: Option<SignupError>,
}

impl SignupWorld {
    /// Creates a world over fresh in-memory stores.
    #[must_use]
    pub fn new() -> Self {
        let clock = SteppedClock::fixed();
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
            organization: None,
            event_in_days: 0,
            task: None,
            volunteers: HashMap::new(),
            signup_outcomes: Vec::new(),
            withdrawal_succeeded: false,
            last_error: None,
        }
    }

    /// Returns the task created by the background steps.
    ///
    /// # Errors
    ///
    /// Returns an error if no task has been created yet.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }

    /// Returns a registered volunteer by name.
    ///
    /// # Errors
    ///
    /// Returns an error if no volunteer with that name was registered.
    pub fn volunteer(&self, name: &str) -> Result<&Volunteer, eyre::Report> {
        self.volunteers
            .get(name)
            .ok_or_else(|| eyre::eyre!("unknown volunteer {name}"))
    }
}

impl Default for SignupWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> SignupWorld {
    SignupWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
