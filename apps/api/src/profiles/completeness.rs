use serde::{Deserialize, Serialize};

use crate::models::profile::JobSeekerProfile;

/// Skills needed for full credit on the skills section.
const FULL_SKILL_COUNT: usize = 3;

const SECTION_WEIGHTS: &[(&str, u32)] = &[
    ("name", 20),
    ("title", 10),
    ("location", 10),
    ("experience", 10),
    ("skills", 20),
    ("bio", 10),
    ("education", 10),
    ("work_history", 10),
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletenessReport {
    pub score: u32, // 0 – 100
    pub missing_sections: Vec<String>,
    pub recommendations: Vec<String>,
}

pub fn compute_completeness_report(name: &str, profile: &JobSeekerProfile) -> CompletenessReport {
    let mut score = 0;
    let mut missing_sections = Vec::new();
    let mut recommendations = Vec::new();

    for (section, weight) in SECTION_WEIGHTS {
        let fraction = section_fraction(section, name, profile);
        score += (f64::from(*weight) * fraction).round() as u32;

        if fraction <= 0.0 {
            missing_sections.push(section.to_string());
            recommendations.push(recommendation_for(section).to_string());
        } else if fraction < 1.0 {
            recommendations.push(format!(
                "Add at least {FULL_SKILL_COUNT} skills so employers can match you"
            ));
        }
    }

    CompletenessReport {
        score: score.min(100),
        missing_sections,
        recommendations,
    }
}

pub fn compute_profile_completeness(name: &str, profile: &JobSeekerProfile) -> u32 {
    compute_completeness_report(name, profile).score
}

fn section_fraction(section: &str, name: &str, profile: &JobSeekerProfile) -> f64 {
    let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
    let flag = |b: bool| if b { 1.0 } else { 0.0 };

    match section {
        "name" => flag(!name.trim().is_empty()),
        "title" => flag(present(&profile.title)),
        "location" => flag(present(&profile.location)),
        "experience" => flag(profile.experience_years.is_some()),
        "skills" => (profile.skills.len().min(FULL_SKILL_COUNT) as f64) / FULL_SKILL_COUNT as f64,
        "bio" => flag(present(&profile.bio)),
        "education" => flag(!profile.education.is_empty()),
        "work_history" => flag(!profile.work_history.is_empty()),
        _ => 0.0,
    }
}

fn recommendation_for(section: &str) -> &'static str {
    match section {
        "name" => "Add your full name",
        "title" => "Add your trade title, e.g. Licensed Electrician",
        "location" => "Add the city you want to work in",
        "experience" => "Add your years of experience",
        "skills" => "Add the skills and certifications you hold",
        "bio" => "Write a short bio about the work you do",
        "education" => "Add your trade school, certificate, or apprenticeship",
        "work_history" => "Add your past and current jobs",
        _ => "Complete your profile",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::{Education, WorkExperience};
    use sqlx::types::Json;
    use uuid::Uuid;

    fn full_profile() -> JobSeekerProfile {
        let mut p = JobSeekerProfile::empty(Uuid::new_v4());
        p.title = Some("Licensed Electrician".to_string());
        p.location = Some("Houston, TX".to_string());
        p.experience_years = Some(8);
        p.skills = Json(vec!["A".into(), "B".into(), "C".into(), "D".into()]);
        p.bio = Some("Journeyman electrician".to_string());
        p.education = Json(vec![Education {
            id: "edu-1".to_string(),
            institution: "Houston Community College".to_string(),
            degree: "Certificate".to_string(),
            field: "Electrical Technology".to_string(),
            start_year: 2014,
            end_year: Some(2016),
        }]);
        p.work_history = Json(vec![WorkExperience {
            id: "work-1".to_string(),
            company: "PowerMax Electric".to_string(),
            position: "Lead Electrician".to_string(),
            location: "Houston, TX".to_string(),
            start_date: "2020-03".to_string(),
            end_date: None,
            current: true,
            description: String::new(),
        }]);
        p
    }

    #[test]
    fn test_fresh_signup_scores_twenty() {
        let p = JobSeekerProfile::empty(Uuid::new_v4());
        let report = compute_completeness_report("Mike Johnson", &p);
        assert_eq!(report.score, 20);
        assert_eq!(report.missing_sections.len(), 7);
        assert!(!report.missing_sections.contains(&"name".to_string()));
    }

    #[test]
    fn test_full_profile_scores_hundred() {
        let report = compute_completeness_report("Mike Johnson", &full_profile());
        assert_eq!(report.score, 100);
        assert!(report.missing_sections.is_empty());
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn test_partial_skills_give_partial_credit() {
        let mut p = JobSeekerProfile::empty(Uuid::new_v4());
        p.skills = Json(vec!["Framing".to_string()]);
        // name 20 + skills round(20 / 3) = 7
        let report = compute_completeness_report("Carlos", &p);
        assert_eq!(report.score, 27);
        assert!(report
            .recommendations
            .iter()
            .any(|r| r.contains("at least 3 skills")));
    }

    #[test]
    fn test_blank_strings_do_not_count() {
        let mut p = JobSeekerProfile::empty(Uuid::new_v4());
        p.title = Some("   ".to_string());
        assert_eq!(compute_profile_completeness("", &p), 0);
    }
}
