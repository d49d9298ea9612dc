use sqlx::{Executor, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::models::application::{ApplicationRow, ApplicationStatus};

pub async fn find_application(
    pool: &SqlitePool,
    job_id: Uuid,
    user_id: Uuid,
) -> Result<Option<ApplicationRow>, sqlx::Error> {
    sqlx::query_as::<_, ApplicationRow>(
        "SELECT * FROM applications WHERE job_id = ? AND user_id = ?",
    )
    .bind(job_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn get_application(
    pool: &SqlitePool,
    id: Uuid,
) -> Result<Option<ApplicationRow>, sqlx::Error> {
    sqlx::query_as::<_, ApplicationRow>("SELECT * FROM applications WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Newest first.
pub async fn list_for_user(
    pool: &SqlitePool,
    user_id: Uuid,
) -> Result<Vec<ApplicationRow>, sqlx::Error> {
    sqlx::query_as::<_, ApplicationRow>(
        "SELECT * FROM applications WHERE user_id = ? ORDER BY applied_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Newest first.
pub async fn list_for_job(
    pool: &SqlitePool,
    job_id: Uuid,
) -> Result<Vec<ApplicationRow>, sqlx::Error> {
    sqlx::query_as::<_, ApplicationRow>(
        "SELECT * FROM applications WHERE job_id = ? ORDER BY applied_at DESC",
    )
    .bind(job_id)
    .fetch_all(pool)
    .await
}

/// Applications across every job posted by a recruiter, newest first.
pub async fn list_for_recruiter(
    pool: &SqlitePool,
    recruiter_id: Uuid,
    limit: i64,
) -> Result<Vec<ApplicationRow>, sqlx::Error> {
    sqlx::query_as::<_, ApplicationRow>(
        r#"
        SELECT a.*
        FROM applications a
        JOIN jobs j ON j.id = a.job_id
        WHERE j.recruiter_id = ?
        ORDER BY a.applied_at DESC
        LIMIT ?
        "#,
    )
    .bind(recruiter_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn insert_application<'e, E>(
    executor: E,
    application: &ApplicationRow,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO applications (id, job_id, user_id, status, applied_at, cover_letter, match_score)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(application.id)
    .bind(application.job_id)
    .bind(application.user_id)
    .bind(application.status)
    .bind(application.applied_at)
    .bind(&application.cover_letter)
    .bind(application.match_score)
    .execute(executor)
    .await?;
    Ok(())
}

/// Moves `id` from `from` to `to`. Returns false, writing nothing, when the
/// stored status is no longer `from`.
pub async fn update_status(
    pool: &SqlitePool,
    id: Uuid,
    from: ApplicationStatus,
    to: ApplicationStatus,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE applications SET status = ? WHERE id = ? AND status = ?")
        .bind(to)
        .bind(id)
        .bind(from)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() == 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::users::find_by_email;
    use crate::db::create_pool;
    use crate::seed::{seed_demo_data, DEMO_SEEKER_EMAIL};

    #[tokio::test]
    async fn test_update_status_skips_stale_source_status() {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        seed_demo_data(&pool, "bluecolab-demo").await.unwrap();
        let mike = find_by_email(&pool, DEMO_SEEKER_EMAIL).await.unwrap().unwrap();
        let shortlisted = list_for_user(&pool, mike.id)
            .await
            .unwrap()
            .into_iter()
            .find(|a| a.status == ApplicationStatus::Shortlisted)
            .unwrap();

        // Caller believes the application is still pending.
        let moved = update_status(
            &pool,
            shortlisted.id,
            ApplicationStatus::Pending,
            ApplicationStatus::Rejected,
        )
        .await
        .unwrap();
        assert!(!moved);
        let current = get_application(&pool, shortlisted.id).await.unwrap().unwrap();
        assert_eq!(current.status, ApplicationStatus::Shortlisted);

        let moved = update_status(
            &pool,
            shortlisted.id,
            ApplicationStatus::Shortlisted,
            ApplicationStatus::Hired,
        )
        .await
        .unwrap();
        assert!(moved);
    }
}
