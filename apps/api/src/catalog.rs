//! Reference lists the clients use for filter pickers and chat prompts.

use axum::Json;
use serde::Serialize;

use crate::models::job::JobType;

pub const SKILLS: [&str; 20] = [
    "Electrical Wiring",
    "Plumbing",
    "Welding",
    "HVAC",
    "Carpentry",
    "Blueprint Reading",
    "OSHA Certified",
    "CDL",
    "Forklift",
    "Heavy Equipment",
    "Pipe Fitting",
    "MIG Welding",
    "TIG Welding",
    "Framing",
    "Concrete",
    "Roofing",
    "Drywall",
    "Painting",
    "Masonry",
    "Safety Procedures",
];

pub const LOCATIONS: [&str; 10] = [
    "Houston, TX",
    "Dallas, TX",
    "Austin, TX",
    "San Antonio, TX",
    "Phoenix, AZ",
    "Denver, CO",
    "Los Angeles, CA",
    "Chicago, IL",
    "Atlanta, GA",
    "Miami, FL",
];

pub const CHAT_SUGGESTIONS: [&str; 5] = [
    "What certifications should I get to increase my pay?",
    "How can I stand out in my trade?",
    "What are the highest paying trades right now?",
    "Tips for negotiating hourly rate",
    "How to transition from apprentice to journeyman?",
];

#[derive(Debug, Serialize)]
pub struct Catalog {
    pub skills: &'static [&'static str],
    pub locations: &'static [&'static str],
    pub job_types: Vec<&'static str>,
    pub chat_suggestions: &'static [&'static str],
}

pub fn catalog() -> Catalog {
    Catalog {
        skills: &SKILLS,
        locations: &LOCATIONS,
        job_types: JobType::ALL.iter().map(JobType::as_str).collect(),
        chat_suggestions: &CHAT_SUGGESTIONS,
    }
}

/// GET /api/v1/catalog
pub async fn handle_catalog() -> Json<Catalog> {
    Json(catalog())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_types_follow_enum() {
        let catalog = catalog();
        assert_eq!(
            catalog.job_types,
            vec!["full-time", "part-time", "contract", "remote", "temporary"]
        );
    }

    #[test]
    fn test_skills_are_unique() {
        let unique: std::collections::HashSet<_> = SKILLS.iter().collect();
        assert_eq!(unique.len(), SKILLS.len());
    }
}
