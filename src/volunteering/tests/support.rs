//! Shared fixtures for volunteering unit tests.

use crate::volunteering::{
    adapters::memory::{
        InMemoryOrganizationRepository, InMemorySignupRepository, InMemoryTaskRepository,
        InMemoryVolunteerRepository,
    },
    domain::{
        ContactDetails, Gender, Organization, Task, TaskDetails, TaskSchedule, Volunteer,
    },
    services::{
        CreateTaskRequest, DirectoryService, SignupCoordinator, TaskDates, TaskLifecycleService,
    },
};
use chrono::{DateTime, Days, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;
use std::sync::{Arc, Mutex, PoisonError};

/// Clock whose time only moves when a test moves it.
#[derive(Debug, Clone)]
pub struct TestClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl TestClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn advance_days(&self, days: u64) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now = *now + Days::new(days);
    }

    pub fn today(&self) -> NaiveDate {
        self.utc().date_naive()
    }
}

impl Clock for TestClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[fixture]
pub fn clock() -> TestClock {
    TestClock::at(
        Utc.with_ymd_and_hms(2026, 3, 2, 9, 30, 0)
            .single()
            .expect("valid fixed timestamp"),
    )
}

pub fn days_from(today: NaiveDate, days: u64) -> NaiveDate {
    today + Days::new(days)
}

pub fn contact(name: &str) -> ContactDetails {
    ContactDetails::new(name, format!("{}@example.org", name.to_lowercase()), "0123456789")
        .expect("valid contact details")
}

pub fn organization(clock: &TestClock) -> Organization {
    Organization::new(
        contact("Harbour"),
        "1 Quay Street",
        "https://harbour.example.org",
        clock,
    )
    .expect("valid organization")
}

pub fn volunteer(name: &str, clock: &TestClock) -> Volunteer {
    Volunteer::new(contact(name), Gender::Undisclosed, clock)
}

/// Builds an unsaved task with the +30/+10/+5 day schedule.
pub fn task_for(organization: &Organization, clock: &TestClock) -> Task {
    let today = clock.today();
    let schedule = TaskSchedule::new(
        days_from(today, 30),
        days_from(today, 10),
        days_from(today, 5),
        today,
    )
    .expect("valid schedule");
    let details =
        TaskDetails::new("Beach clean-up", "Collect litter", "North beach").expect("valid details");
    Task::new(organization.id(), details, schedule, clock)
}

pub fn standard_dates(clock: &TestClock) -> TaskDates {
    let today = clock.today();
    TaskDates {
        event_date: days_from(today, 30),
        application_deadline: days_from(today, 10),
        cancellation_deadline: days_from(today, 5),
    }
}

pub fn create_request(organization: &Organization, dates: TaskDates) -> CreateTaskRequest {
    CreateTaskRequest::new(
        organization.id(),
        "Beach clean-up",
        "Collect litter along the shore",
        "North beach",
        dates,
    )
}

/// In-memory repositories shared by the services under test.
#[derive(Clone, Default)]
pub struct Stores {
    pub organizations: Arc<InMemoryOrganizationRepository>,
    pub volunteers: Arc<InMemoryVolunteerRepository>,
    pub tasks: Arc<InMemoryTaskRepository>,
    pub signups: Arc<InMemorySignupRepository>,
}

pub type Lifecycle = TaskLifecycleService<
    InMemoryOrganizationRepository,
    InMemoryTaskRepository,
    InMemorySignupRepository,
    TestClock,
>;

pub type Coordinator = SignupCoordinator<
    InMemoryTaskRepository,
    InMemoryVolunteerRepository,
    InMemorySignupRepository,
    TestClock,
>;

pub type Directory = DirectoryService<
    InMemoryOrganizationRepository,
    InMemoryVolunteerRepository,
    InMemoryTaskRepository,
    InMemorySignupRepository,
    TestClock,
>;

/// Services wired over one set of stores and one clock.
pub struct Harness {
    pub clock: TestClock,
    pub stores: Stores,
    pub lifecycle: Lifecycle,
    pub coordinator: Coordinator,
    pub directory: Directory,
}

#[fixture]
pub fn harness(clock: TestClock) -> Harness {
    let stores = Stores::default();
    let shared_clock = Arc::new(clock.clone());
    Harness {
        lifecycle: TaskLifecycleService::new(
            Arc::clone(&stores.organizations),
            Arc::clone(&stores.tasks),
            Arc::clone(&stores.signups),
            Arc::clone(&shared_clock),
        ),
        coordinator: SignupCoordinator::new(
            Arc::clone(&stores.tasks),
            Arc::clone(&stores.volunteers),
            Arc::clone(&stores.signups),
            Arc::clone(&shared_clock),
        ),
        directory: DirectoryService::new(
            Arc::clone(&stores.organizations),
            Arc::clone(&stores.volunteers),
            Arc::clone(&stores.tasks),
            Arc::clone(&stores.signups),
            shared_clock,
        ),
        clock,
        stores,
    }
}
