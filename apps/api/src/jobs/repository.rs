use sqlx::types::Json;
use sqlx::{Executor, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::models::job::{Job, JobRow};

pub async fn list_jobs(pool: &SqlitePool) -> Result<Vec<Job>, sqlx::Error> {
    let rows = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs ORDER BY posted_at DESC")
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(Job::from).collect())
}

pub async fn get_job(pool: &SqlitePool, id: Uuid) -> Result<Option<Job>, sqlx::Error> {
    let row = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Job::from))
}

pub async fn list_jobs_by_recruiter(
    pool: &SqlitePool,
    recruiter_id: Uuid,
) -> Result<Vec<Job>, sqlx::Error> {
    let rows = sqlx::query_as::<_, JobRow>(
        "SELECT * FROM jobs WHERE recruiter_id = ? ORDER BY posted_at DESC",
    )
    .bind(recruiter_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(Job::from).collect())
}

pub async fn insert_job<'e, E>(executor: E, job: &Job) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO jobs
            (id, title, company, company_logo, location, job_type,
             salary_min, salary_max, salary_currency, experience_min, experience_max,
             skills, description, responsibilities, requirements, benefits,
             posted_at, deadline, recruiter_id, applicants, match_score)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(job.id)
    .bind(&job.title)
    .bind(&job.company)
    .bind(&job.company_logo)
    .bind(&job.location)
    .bind(job.job_type)
    .bind(job.salary.min)
    .bind(job.salary.max)
    .bind(&job.salary.currency)
    .bind(job.experience.min)
    .bind(job.experience.max)
    .bind(Json(&job.skills))
    .bind(&job.description)
    .bind(Json(&job.responsibilities))
    .bind(Json(&job.requirements))
    .bind(Json(&job.benefits))
    .bind(job.posted_at)
    .bind(job.deadline)
    .bind(job.recruiter_id)
    .bind(job.applicants)
    .bind(job.match_score.map(i64::from))
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn increment_applicants<'e, E>(executor: E, job_id: Uuid) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query("UPDATE jobs SET applicants = applicants + 1 WHERE id = ?")
        .bind(job_id)
        .execute(executor)
        .await?;
    Ok(())
}
