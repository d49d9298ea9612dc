use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(rename_all = "kebab-case")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Remote,
    Temporary,
}

impl JobType {
    pub const ALL: [JobType; 5] = [
        JobType::FullTime,
        JobType::PartTime,
        JobType::Contract,
        JobType::Remote,
        JobType::Temporary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "full-time",
            JobType::PartTime => "part-time",
            JobType::Contract => "contract",
            JobType::Remote => "remote",
            JobType::Temporary => "temporary",
        }
    }

    pub fn parse(raw: &str) -> Option<JobType> {
        JobType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: i64,
    pub max: i64,
    pub currency: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExperienceRange {
    pub min: i64,
    pub max: i64,
}

/// A job posting as exposed by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub company_logo: Option<String>,
    pub location: String,
    pub job_type: JobType,
    pub salary: SalaryRange,
    pub experience: ExperienceRange,
    pub skills: Vec<String>,
    pub description: String,
    pub responsibilities: Vec<String>,
    pub requirements: Vec<String>,
    pub benefits: Vec<String>,
    pub posted_at: DateTime<Utc>,
    pub deadline: Option<DateTime<Utc>>,
    pub recruiter_id: Uuid,
    pub applicants: i64,
    /// Curated score attached to the posting; wins over the computed one.
    pub match_score: Option<u32>,
}

/// Flat storage shape of `jobs`.
#[derive(Debug, Clone, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub company_logo: Option<String>,
    pub location: String,
    pub job_type: JobType,
    pub salary_min: i64,
    pub salary_max: i64,
    pub salary_currency: String,
    pub experience_min: i64,
    pub experience_max: i64,
    pub skills: Json<Vec<String>>,
    pub description: String,
    pub responsibilities: Json<Vec<String>>,
    pub requirements: Json<Vec<String>>,
    pub benefits: Json<Vec<String>>,
    pub posted_at: DateTime<Utc>,
    pub deadline: Option<DateTime<Utc>>,
    pub recruiter_id: Uuid,
    pub applicants: i64,
    pub match_score: Option<i64>,
}

impl From<JobRow> for Job {
    fn from(row: JobRow) -> Self {
        Job {
            id: row.id,
            title: row.title,
            company: row.company,
            company_logo: row.company_logo,
            location: row.location,
            job_type: row.job_type,
            salary: SalaryRange {
                min: row.salary_min,
                max: row.salary_max,
                currency: row.salary_currency,
            },
            experience: ExperienceRange {
                min: row.experience_min,
                max: row.experience_max,
            },
            skills: row.skills.0,
            description: row.description,
            responsibilities: row.responsibilities.0,
            requirements: row.requirements.0,
            benefits: row.benefits.0,
            posted_at: row.posted_at,
            deadline: row.deadline,
            recruiter_id: row.recruiter_id,
            applicants: row.applicants,
            match_score: row.match_score.map(|s| s.clamp(0, 100) as u32),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_type_round_trips_through_parse() {
        for t in JobType::ALL {
            assert_eq!(JobType::parse(t.as_str()), Some(t));
        }
        assert_eq!(JobType::parse(" Full-Time "), Some(JobType::FullTime));
        assert_eq!(JobType::parse("seasonal"), None);
    }

    #[test]
    fn test_job_type_serializes_kebab_case() {
        let s = serde_json::to_string(&JobType::PartTime).unwrap();
        assert_eq!(s, "\"part-time\"");
    }
}
