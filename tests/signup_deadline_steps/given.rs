//! Given steps for signup deadline scenarios.

use super::world::{SignupWorld, run_async};
use crate::test_helpers::days_after;
use eyre::WrapErr;
use rstest_bdd_macros::given;
use volunteer_platform::volunteering::services::{
    CreateTaskRequest, RegisterOrganizationRequest, RegisterVolunteerRequest, TaskDates,
};

#[given("an organization with a task held in {days:u64} days")]
fn organization_with_event(world: &mut SignupWorld, days: u64) -> Result<(), eyre::Report> {
    let organization = run_async(world.directory.register_organization(
        RegisterOrganizationRequest::new(
            "Harbour Trust",
            "info@harbour.example.org",
            "0201234567",
            "1 Quay Street",
            "https://harbour.example.org",
        ),
    ))
    .wrap_err("register organization")?;
    world.organization = Some(organization);
    world.event_in_days = days;
    Ok(())
}

#[given(
    "the application deadline is in {application:u64} days and the cancellation deadline in {cancellation:u64} days"
)]
fn task_with_deadlines(
    world: &mut SignupWorld,
    application: u64,
    cancellation: u64,
) -> Result<(), eyre::Report> {
    let organization_id = world
        .organization
        .as_ref()
        .map(|organization| organization.id())
        .ok_or_else(|| eyre::eyre!("missing organization in scenario world"))?;
    let today = world.clock.today();
    let dates = TaskDates {
        event_date: days_after(today, world.event_in_days),
        application_deadline: days_after(today, application),
        cancellation_deadline: days_after(today, cancellation),
    };
    let task = run_async(world.lifecycle.create_task(CreateTaskRequest::new(
        organization_id,
        "Harbour clean-up",
        "Clear litter from the slipway",
        "Harbour slipway",
        dates,
    )))
    .wrap_err("create task")?;
    world.task = Some(task);
    Ok(())
}

#[given(r#"a volunteer named "{name}""#)]
fn volunteer_named(world: &mut SignupWorld, name: String) -> Result<(), eyre::Report> {
    let volunteer = run_async(world.directory.register_volunteer(
        RegisterVolunteerRequest::new(
            name.as_str(),
            format!("{}@example.org", name.to_lowercase()),
            "0123456789",
        ),
    ))
    .wrap_err("register volunteer")?;
    world.volunteers.insert(name, volunteer);
    Ok(())
}

#[given(r#""{name}" has signed up for the task"#)]
fn already_signed_up(world: &mut SignupWorld, name: String) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let volunteer_id = world.volunteer(&name)?.id();
    let outcome = run_async(world.coordinator.sign_up(task_id, volunteer_id))
        .wrap_err("initial signup")?;
    world.signup_outcomes.push(outcome);
    Ok(())
}
