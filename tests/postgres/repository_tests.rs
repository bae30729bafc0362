//! Repository behaviour that rests on the `PostgreSQL` schema.

use super::helpers::{PgPlatform, test_runtime};
use chrono::{Duration, TimeZone, Utc};
use eyre::{OptionExt, ensure};
use mockable::Clock;
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;
use volunteer_platform::volunteering::{
    domain::{ErrorKind, SignupId, TaskId, TaskSignup},
    ports::{
        EntityRef, OrganizationRepository, RepositoryError, SignupRepository, TaskRepository,
        VolunteerRepository,
    },
};

#[rstest]
fn second_signup_for_pair_hits_unique_index(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let platform = PgPlatform::new(shared_test_cluster, "pair_unique", 2)?;
    let rt = test_runtime()?;
    rt.block_on(async {
        let org = platform.organization("Shelter").await?;
        let task = platform.standard_task(&org).await?;
        let person = platform.volunteer("Ada").await?;
        let first = TaskSignup::new(task.id(), person.id(), &platform.clock);
        let second = TaskSignup::new(task.id(), person.id(), &platform.clock);

        platform.stores.signups.store(&first).await?;
        let result = platform.stores.signups.store(&second).await;

        ensure!(
            matches!(
                result,
                Err(RepositoryError::DuplicateSignup { task_id, volunteer_id })
                    if task_id == task.id() && volunteer_id == person.id()
            ),
            "expected a duplicate signup rejection, got {result:?}"
        );
        ensure!(
            platform.stores.signups.find_by_task(task.id()).await? == vec![first],
            "only the first signup is stored"
        );
        Ok(())
    })
}

#[rstest]
fn missing_rows_report_not_found(shared_test_cluster: &'static TestCluster) -> eyre::Result<()> {
    let platform = PgPlatform::new(shared_test_cluster, "missing_rows", 2)?;
    let rt = test_runtime()?;
    rt.block_on(async {
        let person = platform.volunteer("Ada").await?;
        platform.directory.delete_volunteer(person.id()).await?;

        let update = platform.stores.volunteers.update(&person).await;
        let expected = EntityRef::Volunteer(person.id());
        ensure!(
            matches!(update, Err(RepositoryError::NotFound(found)) if found == expected),
            "update of a deleted volunteer: {update:?}"
        );

        let missing_id = TaskId::new();
        let missing_task = EntityRef::Task(missing_id);
        let task_delete = platform.stores.tasks.delete(missing_id).await;
        ensure!(
            matches!(task_delete, Err(RepositoryError::NotFound(found)) if found == missing_task),
            "delete of an unknown task: {task_delete:?}"
        );

        let signup_delete = platform.stores.signups.delete(SignupId::new()).await;
        ensure!(
            signup_delete.as_ref().err().map(RepositoryError::kind) == Some(ErrorKind::NotFound),
            "delete of an unknown signup: {signup_delete:?}"
        );
        Ok(())
    })
}

#[rstest]
fn signup_date_range_includes_both_ends(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let platform = PgPlatform::new(shared_test_cluster, "signup_range", 2)?;
    let rt = test_runtime()?;
    rt.block_on(async {
        let org = platform.organization("Shelter").await?;
        let task = platform.standard_task(&org).await?;
        let start = Utc
            .with_ymd_and_hms(2026, 5, 1, 8, 0, 0)
            .single()
            .ok_or_eyre("valid start instant")?;
        let mut stored = Vec::new();
        for (offset, name) in [(0, "Ada"), (2, "Grace"), (4, "Joan")] {
            let person = platform.volunteer(name).await?;
            let signup = TaskSignup::from_persisted(
                SignupId::new(),
                task.id(),
                person.id(),
                start + Duration::hours(offset),
            );
            platform.stores.signups.store(&signup).await?;
            stored.push(signup);
        }

        let window = platform
            .stores
            .signups
            .find_by_signup_date_between(start, start + Duration::hours(2))
            .await?;
        ensure!(
            window == stored.iter().take(2).cloned().collect::<Vec<_>>(),
            "both boundary signups are included: {window:?}"
        );

        let instant = start + Duration::hours(4);
        let single = platform
            .stores
            .signups
            .find_by_signup_date_between(instant, instant)
            .await?;
        ensure!(single.len() == 1, "a zero-width range matches its instant");
        Ok(())
    })
}

#[rstest]
fn organization_task_collection_keeps_attachment_order(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let platform = PgPlatform::new(shared_test_cluster, "task_order", 2)?;
    let rt = test_runtime()?;
    rt.block_on(async {
        let org = platform.organization("Shelter").await?;
        let mut created = Vec::new();
        for _ in 0..3 {
            created.push(platform.standard_task(&org).await?.id());
        }

        let stored = platform
            .stores
            .organizations
            .find_by_id(org.id())
            .await?
            .ok_or_eyre("organization present")?;
        ensure!(
            stored.task_ids() == created.as_slice(),
            "collection order survives the UUID[] column"
        );

        let reloaded = platform
            .stores
            .tasks
            .find_by_id(created.first().copied().ok_or_eyre("one task")?)
            .await?
            .ok_or_eyre("task present")?;
        ensure!(
            reloaded.organization_id() == org.id()
                && reloaded.created_at() == platform.clock.utc(),
            "task row round-trips"
        );
        Ok(())
    })
}

#[rstest]
fn organization_with_tasks_is_protected_by_foreign_key(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let platform = PgPlatform::new(shared_test_cluster, "org_restrict", 2)?;
    let rt = test_runtime()?;
    rt.block_on(async {
        let org = platform.organization("Shelter").await?;
        platform.standard_task(&org).await?;

        let result = platform.stores.organizations.delete(org.id()).await;

        ensure!(
            matches!(result, Err(RepositoryError::Persistence(_))),
            "direct delete must be refused: {result:?}"
        );
        ensure!(
            platform
                .stores
                .organizations
                .find_by_id(org.id())
                .await?
                .is_some(),
            "organization is still stored"
        );
        Ok(())
    })
}
