use sqlx::types::Json;
use sqlx::{Executor, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::models::profile::{JobSeekerProfile, RecruiterProfile};
use crate::models::user::{User, UserRole};

pub async fn get_jobseeker_profile(
    pool: &SqlitePool,
    user_id: Uuid,
) -> Result<Option<JobSeekerProfile>, sqlx::Error> {
    sqlx::query_as::<_, JobSeekerProfile>("SELECT * FROM jobseeker_profiles WHERE user_id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn get_recruiter_profile(
    pool: &SqlitePool,
    user_id: Uuid,
) -> Result<Option<RecruiterProfile>, sqlx::Error> {
    sqlx::query_as::<_, RecruiterProfile>("SELECT * FROM recruiter_profiles WHERE user_id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Inserts or replaces the whole job seeker profile row.
pub async fn save_jobseeker_profile<'e, E>(
    executor: E,
    profile: &JobSeekerProfile,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO jobseeker_profiles
            (user_id, title, location, experience_years, skills, bio, resume_url,
             profile_completeness, education, work_history)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT (user_id) DO UPDATE SET
            title = excluded.title,
            location = excluded.location,
            experience_years = excluded.experience_years,
            skills = excluded.skills,
            bio = excluded.bio,
            resume_url = excluded.resume_url,
            profile_completeness = excluded.profile_completeness,
            education = excluded.education,
            work_history = excluded.work_history
        "#,
    )
    .bind(profile.user_id)
    .bind(&profile.title)
    .bind(&profile.location)
    .bind(profile.experience_years)
    .bind(Json(&profile.skills.0))
    .bind(&profile.bio)
    .bind(&profile.resume_url)
    .bind(profile.profile_completeness)
    .bind(Json(&profile.education.0))
    .bind(Json(&profile.work_history.0))
    .execute(executor)
    .await?;
    Ok(())
}

/// Inserts or edits a recruiter profile. `jobs_posted` is only taken on insert;
/// afterwards `increment_jobs_posted` owns it.
pub async fn save_recruiter_profile<'e, E>(
    executor: E,
    profile: &RecruiterProfile,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO recruiter_profiles (user_id, company, company_logo, position, jobs_posted)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT (user_id) DO UPDATE SET
            company = excluded.company,
            company_logo = excluded.company_logo,
            position = excluded.position
        "#,
    )
    .bind(profile.user_id)
    .bind(&profile.company)
    .bind(&profile.company_logo)
    .bind(&profile.position)
    .bind(profile.jobs_posted)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn increment_jobs_posted<'e, E>(executor: E, user_id: Uuid) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query("UPDATE recruiter_profiles SET jobs_posted = jobs_posted + 1 WHERE user_id = ?")
        .bind(user_id)
        .execute(executor)
        .await?;
    Ok(())
}

/// Skills of a job seeker caller; `None` for recruiters and anonymous callers.
pub async fn seeker_skills(
    pool: &SqlitePool,
    user: Option<&User>,
) -> Result<Option<Vec<String>>, sqlx::Error> {
    match user {
        Some(u) if u.role == UserRole::Jobseeker => Ok(Some(
            get_jobseeker_profile(pool, u.id)
                .await?
                .map(|p| p.skills.0)
                .unwrap_or_default(),
        )),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::users::find_by_email;
    use crate::db::create_pool;
    use crate::seed::{seed_demo_data, DEMO_RECRUITER_EMAIL};

    #[tokio::test]
    async fn test_profile_edit_keeps_concurrent_job_count() {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        seed_demo_data(&pool, "bluecolab-demo").await.unwrap();
        let sarah = find_by_email(&pool, DEMO_RECRUITER_EMAIL).await.unwrap().unwrap();

        // Profile read before a job is posted, saved after.
        let mut stale = get_recruiter_profile(&pool, sarah.id).await.unwrap().unwrap();
        assert_eq!(stale.jobs_posted, 6);
        increment_jobs_posted(&pool, sarah.id).await.unwrap();

        stale.position = "Talent Lead".to_string();
        save_recruiter_profile(&pool, &stale).await.unwrap();

        let stored = get_recruiter_profile(&pool, sarah.id).await.unwrap().unwrap();
        assert_eq!(stored.position, "Talent Lead");
        assert_eq!(stored.jobs_posted, 7);
    }
}
