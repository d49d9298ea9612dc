use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::job::{ExperienceRange, JobType};

#[derive(Debug, Clone, Deserialize)]
pub struct SalaryInput {
    pub min: i64,
    pub max: i64,
    pub currency: Option<String>,
}

/// Body of `POST /api/v1/jobs`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateJobRequest {
    pub title: String,
    /// Defaults to the recruiter's company.
    pub company: Option<String>,
    pub company_logo: Option<String>,
    pub location: String,
    pub job_type: JobType,
    pub salary: SalaryInput,
    pub experience: ExperienceRange,
    pub skills: Vec<String>,
    pub description: String,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    pub deadline: Option<DateTime<Utc>>,
}

/// Collects every problem with a new posting into one validation error.
pub fn validate_new_job(req: &CreateJobRequest, now: DateTime<Utc>) -> Result<(), AppError> {
    let mut problems = Vec::new();

    for (field, value) in [
        ("title", &req.title),
        ("location", &req.location),
        ("description", &req.description),
    ] {
        if value.trim().is_empty() {
            problems.push(format!("{field} is required"));
        }
    }
    if req
        .company
        .as_deref()
        .is_some_and(|c| c.trim().is_empty())
    {
        problems.push("company cannot be blank".to_string());
    }
    if normalize_list(&req.skills).is_empty() {
        problems.push("at least one skill is required".to_string());
    }
    if req.salary.min < 0 || req.salary.max < 0 {
        problems.push("salary cannot be negative".to_string());
    }
    if req.salary.min > req.salary.max {
        problems.push("salary.min cannot exceed salary.max".to_string());
    }
    if req.experience.min < 0 || req.experience.max < 0 {
        problems.push("experience cannot be negative".to_string());
    }
    if req.experience.min > req.experience.max {
        problems.push("experience.min cannot exceed experience.max".to_string());
    }
    if req.deadline.is_some_and(|d| d <= now) {
        problems.push("deadline must be in the future".to_string());
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(problems.join("; ")))
    }
}

/// Trims entries, drops blanks and repeats, keeps first-seen order.
pub fn normalize_list(items: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let item = item.trim();
        if !item.is_empty() && !out.iter().any(|seen| seen == item) {
            out.push(item.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn valid_request() -> CreateJobRequest {
        CreateJobRequest {
            title: "Plumber".to_string(),
            company: None,
            company_logo: None,
            location: "Dallas, TX".to_string(),
            job_type: JobType::FullTime,
            salary: SalaryInput {
                min: 48_000,
                max: 68_000,
                currency: None,
            },
            experience: ExperienceRange { min: 2, max: 5 },
            skills: vec!["Pipe Fitting".to_string()],
            description: "Residential and commercial plumbing".to_string(),
            responsibilities: vec![],
            requirements: vec![],
            benefits: vec![],
            deadline: None,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(validate_new_job(&valid_request(), Utc::now()).is_ok());
    }

    #[test]
    fn test_all_problems_reported_together() {
        let mut req = valid_request();
        req.title = "  ".to_string();
        req.salary.min = 90_000;
        req.skills = vec![" ".to_string()];

        let Err(AppError::Validation(msg)) = validate_new_job(&req, Utc::now()) else {
            panic!("expected validation error");
        };
        assert!(msg.contains("title is required"));
        assert!(msg.contains("salary.min cannot exceed salary.max"));
        assert!(msg.contains("at least one skill"));
    }

    #[test]
    fn test_past_deadline_rejected() {
        let now = Utc::now();
        let mut req = valid_request();
        req.deadline = Some(now - Duration::days(1));
        assert!(validate_new_job(&req, now).is_err());
        req.deadline = Some(now + Duration::days(30));
        assert!(validate_new_job(&req, now).is_ok());
    }

    #[test]
    fn test_inverted_experience_rejected() {
        let mut req = valid_request();
        req.experience = ExperienceRange { min: 6, max: 2 };
        assert!(validate_new_job(&req, Utc::now()).is_err());
    }

    #[test]
    fn test_normalize_list_dedups_in_order() {
        let items = vec![
            " Framing".to_string(),
            "Power Tools".to_string(),
            "Framing ".to_string(),
            "".to_string(),
        ];
        assert_eq!(normalize_list(&items), vec!["Framing", "Power Tools"]);
    }
}
