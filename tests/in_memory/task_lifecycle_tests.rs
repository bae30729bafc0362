//! In-memory integration tests for task lifecycle operations.

use super::helpers::{Platform, platform};
use crate::test_helpers::days_after;
use rstest::rstest;
use volunteer_platform::volunteering::{
    domain::{ErrorKind, TaskStatus},
    services::{CreateTaskRequest, TaskDates, UpdateTaskRequest},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_tasks_are_owned_in_creation_order(platform: Platform) -> eyre::Result<()> {
    let org = platform.organization("Food Bank").await?;
    let first = platform.standard_task(&org).await?;
    let second = platform.standard_task(&org).await?;

    let owned = platform.directory.organization_tasks(org.id()).await?;
    let ids: Vec<_> = owned.iter().map(|task| task.id()).collect();

    eyre::ensure!(ids == vec![first.id(), second.id()], "unexpected task order");
    eyre::ensure!(
        platform.lifecycle.list_tasks().await?.len() == 2,
        "expected both tasks to be listed"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deadline_on_today_is_accepted_and_yesterday_is_not(
    platform: Platform,
) -> eyre::Result<()> {
    let org = platform.organization("Food Bank").await?;
    let today = platform.clock.today();
    let on_today = TaskDates {
        event_date: today,
        application_deadline: today,
        cancellation_deadline: today,
    };
    platform
        .lifecycle
        .create_task(CreateTaskRequest::new(
            org.id(),
            "Same-day shift",
            "Help out today",
            "Warehouse 3",
            on_today,
        ))
        .await?;

    let yesterday = today
        .pred_opt()
        .ok_or_else(|| eyre::eyre!("no previous day"))?;
    let result = platform
        .lifecycle
        .create_task(CreateTaskRequest::new(
            org.id(),
            "Late shift",
            "Too late",
            "Warehouse 3",
            TaskDates {
                event_date: days_after(today, 2),
                application_deadline: today,
                cancellation_deadline: yesterday,
            },
        ))
        .await;

    let err = result
        .err()
        .ok_or_else(|| eyre::eyre!("past cancellation deadline was accepted"))?;
    eyre::ensure!(err.kind() == ErrorKind::InvalidInput, "wrong kind: {err}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn editing_keeps_dates_and_status_moves_with_clock(platform: Platform) -> eyre::Result<()> {
    let org = platform.organization("Food Bank").await?;
    let task = platform.standard_task(&org).await?;

    let edited = platform
        .lifecycle
        .update_task(
            task.id(),
            &UpdateTaskRequest::new()
                .with_title("Evening food bank shift")
                .with_description("Sort, pack and load donations"),
        )
        .await?;
    eyre::ensure!(edited.schedule() == task.schedule(), "dates changed on edit");
    eyre::ensure!(edited.details().location() == "Warehouse 3", "location lost");

    eyre::ensure!(
        platform.lifecycle.task_status(task.id()).await? == TaskStatus::Available,
        "new task should be available"
    );
    platform.clock.advance_days(31);
    eyre::ensure!(
        platform.lifecycle.task_status(task.id()).await? == TaskStatus::Ended,
        "task should have ended"
    );
    Ok(())
}
