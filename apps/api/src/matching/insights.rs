use crate::matching::scorer::MatchResult;
use crate::models::profile::JobSeekerProfile;

/// Builds the short recruiter-facing notes shown next to an applicant.
pub fn build_insights(profile: &JobSeekerProfile, result: &MatchResult) -> Vec<String> {
    let mut insights = Vec::new();

    insights.push(experience_line(profile.experience_years));

    if let Some(position) = profile.current_position() {
        insights.push(format!("Currently working as {position}"));
    } else if let Some(title) = profile.title.as_deref() {
        insights.push(format!("Profile title: {title}"));
    }

    let missing = &result.alignment.missing;
    if missing.is_empty() {
        insights.push("All required skills in place".to_string());
    } else {
        let top: Vec<&str> = missing.iter().take(3).map(String::as_str).collect();
        insights.push(format!(
            "Missing {} required skill{}: {}",
            missing.len(),
            if missing.len() == 1 { "" } else { "s" },
            top.join(", ")
        ));
    }

    if !result.alignment.additional.is_empty() {
        insights.push(format!(
            "Brings {} additional skill{}",
            result.alignment.additional.len(),
            if result.alignment.additional.len() == 1 { "" } else { "s" }
        ));
    }

    insights.push(format!("Skill match: {}%", result.score));
    insights
}

fn experience_line(years: Option<i64>) -> String {
    match years.unwrap_or(0) {
        y if y >= 10 => format!("Highly experienced: {y} years in the trade"),
        y if y >= 5 => format!("Strong experience with {y}+ years in the trade"),
        y if y >= 1 => format!("{y} year{} of hands-on experience", if y == 1 { "" } else { "s" }),
        _ => "Entry-level candidate with potential".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::scorer::{MatchTier, SkillAlignment};
    use crate::models::profile::WorkExperience;
    use sqlx::types::Json;
    use uuid::Uuid;

    fn result(score: u32, missing: &[&str], additional: &[&str]) -> MatchResult {
        MatchResult {
            score,
            tier: MatchTier::from_score(score),
            alignment: SkillAlignment {
                matched: vec![],
                missing: missing.iter().map(|s| s.to_string()).collect(),
                additional: additional.iter().map(|s| s.to_string()).collect(),
            },
        }
    }

    #[test]
    fn test_veteran_with_full_coverage() {
        let mut profile = JobSeekerProfile::empty(Uuid::new_v4());
        profile.experience_years = Some(15);
        profile.work_history = Json(vec![WorkExperience {
            id: "work-1".to_string(),
            company: "PowerMax Electric".to_string(),
            position: "Lead Electrician".to_string(),
            location: "Houston, TX".to_string(),
            start_date: "2020-03".to_string(),
            end_date: None,
            current: true,
            description: String::new(),
        }]);

        let insights = build_insights(&profile, &result(98, &[], &["Team Leadership"]));
        assert!(insights[0].contains("15 years"));
        assert!(insights.contains(&"Currently working as Lead Electrician".to_string()));
        assert!(insights.contains(&"All required skills in place".to_string()));
        assert!(insights.contains(&"Brings 1 additional skill".to_string()));
        assert_eq!(insights.last().unwrap(), "Skill match: 98%");
    }

    #[test]
    fn test_entry_level_lists_missing_skills() {
        let profile = JobSeekerProfile::empty(Uuid::new_v4());
        let insights = build_insights(
            &profile,
            &result(20, &["NEC Code", "OSHA Certified", "Blueprint Reading", "Troubleshooting"], &[]),
        );
        assert_eq!(insights[0], "Entry-level candidate with potential");
        assert!(insights[1].starts_with("Missing 4 required skills: NEC Code, OSHA Certified, Blueprint Reading"));
        assert!(!insights[1].contains("Troubleshooting"));
    }

    #[test]
    fn test_single_year_is_singular() {
        assert_eq!(experience_line(Some(1)), "1 year of hands-on experience");
        assert_eq!(experience_line(Some(6)), "Strong experience with 6+ years in the trade");
    }
}
