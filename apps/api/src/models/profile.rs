use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub id: String,
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_year: i32,
    pub end_year: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkExperience {
    pub id: String,
    pub company: String,
    pub position: String,
    pub location: String,
    /// `YYYY-MM`
    pub start_date: String,
    pub end_date: Option<String>,
    pub current: bool,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct JobSeekerProfile {
    pub user_id: Uuid,
    pub title: Option<String>,
    pub location: Option<String>,
    pub experience_years: Option<i64>,
    pub skills: Json<Vec<String>>,
    pub bio: Option<String>,
    pub resume_url: Option<String>,
    pub profile_completeness: i64,
    pub education: Json<Vec<Education>>,
    pub work_history: Json<Vec<WorkExperience>>,
}

impl JobSeekerProfile {
    pub fn empty(user_id: Uuid) -> Self {
        JobSeekerProfile {
            user_id,
            title: None,
            location: None,
            experience_years: None,
            skills: Json(Vec::new()),
            bio: None,
            resume_url: None,
            profile_completeness: 0,
            education: Json(Vec::new()),
            work_history: Json(Vec::new()),
        }
    }

    /// Title of the ongoing position, if any.
    pub fn current_position(&self) -> Option<&str> {
        self.work_history
            .iter()
            .find(|w| w.current)
            .map(|w| w.position.as_str())
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RecruiterProfile {
    pub user_id: Uuid,
    pub company: String,
    pub company_logo: Option<String>,
    pub position: String,
    pub jobs_posted: i64,
}
