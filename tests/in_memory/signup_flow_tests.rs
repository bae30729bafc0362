//! In-memory integration tests for joining and leaving tasks.

use super::helpers::{Platform, platform};
use rstest::rstest;
use std::sync::Arc;
use volunteer_platform::volunteering::{domain::ErrorKind, services::SignupError};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_signups_create_exactly_one_record(platform: Platform) -> eyre::Result<()> {
    let org = platform.organization("Shelter").await?;
    let task = platform.standard_task(&org).await?;
    let person = platform.volunteer("Ada").await?;

    let coordinator = Arc::new(platform.coordinator.clone());
    let mut handles = Vec::new();
    for _ in 0..8 {
        let worker = Arc::clone(&coordinator);
        let (task_id, volunteer_id) = (task.id(), person.id());
        handles.push(tokio::spawn(async move {
            worker.sign_up(task_id, volunteer_id).await
        }));
    }

    let mut created = 0;
    let mut ids = Vec::new();
    for handle in handles {
        let outcome = handle.await??;
        if outcome.is_created() {
            created += 1;
        }
        ids.push(outcome.signup().id());
    }

    eyre::ensure!(created == 1, "expected one created signup, got {created}");
    eyre::ensure!(
        ids.windows(2).all(|pair| pair.first() == pair.last()),
        "all requests must observe the same signup"
    );
    eyre::ensure!(
        platform.coordinator.signups_for_task(task.id()).await?.len() == 1,
        "store holds more than one signup"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn withdrawn_volunteer_can_sign_up_again(platform: Platform) -> eyre::Result<()> {
    let org = platform.organization("Shelter").await?;
    let task = platform.standard_task(&org).await?;
    let person = platform.volunteer("Ada").await?;

    let first = platform.coordinator.sign_up(task.id(), person.id()).await?;
    platform.coordinator.cancel_signup(task.id(), person.id()).await?;
    let second = platform.coordinator.sign_up(task.id(), person.id()).await?;

    eyre::ensure!(second.is_created(), "re-joining should create a record");
    eyre::ensure!(
        first.signup().id() != second.signup().id(),
        "a withdrawn signup must not be reused"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn error_kinds_distinguish_missing_and_late(platform: Platform) -> eyre::Result<()> {
    let org = platform.organization("Shelter").await?;
    let task = platform.standard_task(&org).await?;
    let person = platform.volunteer("Ada").await?;
    platform.coordinator.sign_up(task.id(), person.id()).await?;

    platform.clock.advance_days(8);
    let late_cancel = platform
        .coordinator
        .cancel_signup(task.id(), person.id())
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("late cancellation succeeded"))?;
    eyre::ensure!(
        late_cancel.kind() == ErrorKind::DeadlinePassed,
        "unexpected error {late_cancel}"
    );

    let stranger = platform.volunteer("Grace").await?;
    let not_joined = platform
        .coordinator
        .cancel_signup(task.id(), stranger.id())
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("cancelling a missing signup succeeded"))?;
    eyre::ensure!(
        matches!(not_joined, SignupError::NotSignedUp { .. }),
        "unexpected error {not_joined}"
    );
    eyre::ensure!(not_joined.kind() == ErrorKind::NotFound, "wrong kind");
    Ok(())
}
