//! In-memory integration tests for cascading deletes.

use super::helpers::{Platform, platform};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_an_organization_removes_everything_it_owns(
    platform: Platform,
) -> eyre::Result<()> {
    let doomed = platform.organization("Closing Charity").await?;
    let survivor = platform.organization("Shelter").await?;
    let doomed_task = platform.standard_task(&doomed).await?;
    let kept_task = platform.standard_task(&survivor).await?;
    let person = platform.volunteer("Ada").await?;
    platform.coordinator.sign_up(doomed_task.id(), person.id()).await?;
    platform.coordinator.sign_up(kept_task.id(), person.id()).await?;

    let report = platform.directory.delete_organization(doomed.id()).await?;

    eyre::ensure!(report.tasks_removed == 1, "expected one task removed");
    eyre::ensure!(report.signups_removed == 1, "expected one signup removed");
    let remaining = platform.coordinator.signups_for_volunteer(person.id()).await?;
    eyre::ensure!(
        remaining.iter().all(|signup| signup.task_id() == kept_task.id()) && remaining.len() == 1,
        "only the surviving task's signup should remain"
    );
    eyre::ensure!(
        platform.lifecycle.find_task(doomed_task.id()).await?.is_none(),
        "owned task survived"
    );
    eyre::ensure!(
        platform.directory.find_organization(doomed.id()).await?.is_none(),
        "organization survived"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_task_detaches_it_from_the_owner(platform: Platform) -> eyre::Result<()> {
    let org = platform.organization("Shelter").await?;
    let first = platform.standard_task(&org).await?;
    let second = platform.standard_task(&org).await?;
    let person = platform.volunteer("Ada").await?;
    platform.coordinator.sign_up(first.id(), person.id()).await?;

    platform.clock.advance_days(20);
    let report = platform.lifecycle.delete_task(first.id()).await?;

    eyre::ensure!(report.signups_removed == 1, "signup past deadline not removed");
    let owner = platform
        .directory
        .find_organization(org.id())
        .await?
        .ok_or_else(|| eyre::eyre!("organization missing"))?;
    eyre::ensure!(owner.task_ids() == [second.id()], "task still attached");
    eyre::ensure!(
        platform.coordinator.all_signups().await?.is_empty(),
        "signups outlived their task"
    );
    Ok(())
}
