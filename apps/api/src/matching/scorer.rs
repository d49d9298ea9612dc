//! Match scoring: measures how well a job seeker's skills cover a job's skill list.
//!
//! Default: `SkillOverlapScorer` (exact skill-name overlap, deterministic).
//!
//! `AppState` holds an `Arc<dyn MatchScorer>`, chosen at startup.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::job::Job;

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// How a seeker's skills line up against a job's skill list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillAlignment {
    /// Job skills the seeker has, in job order.
    pub matched: Vec<String>,
    /// Job skills the seeker lacks, in job order.
    pub missing: Vec<String>,
    /// Seeker skills the job does not ask for, in seeker order.
    pub additional: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Strong,   // ≥ 80
    Moderate, // 60 – 79
    Low,
}

impl MatchTier {
    pub fn from_score(score: u32) -> Self {
        if score >= 80 {
            MatchTier::Strong
        } else if score >= 60 {
            MatchTier::Moderate
        } else {
            MatchTier::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score: u32, // 0 – 100
    pub tier: MatchTier,
    pub alignment: SkillAlignment,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap match backends without touching handlers.
#[async_trait]
pub trait MatchScorer: Send + Sync {
    async fn score(&self, job: &Job, seeker_skills: &[String]) -> Result<MatchResult, AppError>;

    /// Label reported alongside scores.
    fn backend(&self) -> &'static str;
}

/// Exact skill-name overlap scorer.
///
/// score = round(100 × |matched| / |job skills|), unless the posting carries
/// a curated `match_score`, which is returned as-is.
pub struct SkillOverlapScorer;

#[async_trait]
impl MatchScorer for SkillOverlapScorer {
    async fn score(&self, job: &Job, seeker_skills: &[String]) -> Result<MatchResult, AppError> {
        Ok(compute_match(job, seeker_skills))
    }

    fn backend(&self) -> &'static str {
        "skill_overlap"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core overlap algorithm
// ────────────────────────────────────────────────────────────────────────────

/// A curated score on the job wins; a curated 0 counts as unset.
pub fn compute_match(job: &Job, seeker_skills: &[String]) -> MatchResult {
    let alignment = align_skills(&job.skills, seeker_skills);
    let score = job
        .match_score
        .filter(|&curated| curated > 0)
        .unwrap_or_else(|| overlap_score(&alignment, job.skills.len()))
        .min(100);

    MatchResult {
        score,
        tier: MatchTier::from_score(score),
        alignment,
    }
}

pub fn align_skills(job_skills: &[String], seeker_skills: &[String]) -> SkillAlignment {
    let (matched, missing): (Vec<String>, Vec<String>) = job_skills
        .iter()
        .cloned()
        .partition(|skill| seeker_skills.contains(skill));

    let additional = seeker_skills
        .iter()
        .filter(|skill| !job_skills.contains(skill))
        .cloned()
        .collect();

    SkillAlignment {
        matched,
        missing,
        additional,
    }
}

/// Percentage of job skills covered by the seeker. A job with no skills scores 0.
#[allow(dead_code)]
pub fn match_score(job_skills: &[String], seeker_skills: &[String]) -> u32 {
    overlap_score(&align_skills(job_skills, seeker_skills), job_skills.len())
}

fn overlap_score(alignment: &SkillAlignment, job_skill_count: usize) -> u32 {
    if job_skill_count == 0 {
        return 0;
    }
    ((alignment.matched.len() as f64 / job_skill_count as f64) * 100.0).round() as u32
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::{ExperienceRange, JobType, SalaryRange};
    use chrono::Utc;
    use uuid::Uuid;

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn make_job(job_skills: &[&str], curated: Option<u32>) -> Job {
        Job {
            id: Uuid::new_v4(),
            title: "Licensed Electrician".to_string(),
            company: "PowerMax Electric".to_string(),
            company_logo: None,
            location: "Houston, TX".to_string(),
            job_type: JobType::FullTime,
            salary: SalaryRange {
                min: 55_000,
                max: 75_000,
                currency: "USD".to_string(),
            },
            experience: ExperienceRange { min: 3, max: 7 },
            skills: skills(job_skills),
            description: String::new(),
            responsibilities: vec![],
            requirements: vec![],
            benefits: vec![],
            posted_at: Utc::now(),
            deadline: None,
            recruiter_id: Uuid::new_v4(),
            applicants: 0,
            match_score: curated,
        }
    }

    #[test]
    fn test_alignment_partitions_job_skills() {
        let job = skills(&["Electrical Wiring", "NEC Code", "OSHA Certified"]);
        let seeker = skills(&["NEC Code", "Hand Tools", "Electrical Wiring"]);

        let a = align_skills(&job, &seeker);
        assert_eq!(a.matched, skills(&["Electrical Wiring", "NEC Code"]));
        assert_eq!(a.missing, skills(&["OSHA Certified"]));
        assert_eq!(a.additional, skills(&["Hand Tools"]));
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let a = align_skills(&skills(&["Welding"]), &skills(&["welding"]));
        assert!(a.matched.is_empty());
        assert_eq!(a.missing.len(), 1);
    }

    #[test]
    fn test_score_rounds_to_nearest() {
        // 2 of 3 → 66.67 → 67
        let score = match_score(
            &skills(&["A", "B", "C"]),
            &skills(&["A", "B"]),
        );
        assert_eq!(score, 67);
    }

    #[test]
    fn test_full_and_zero_overlap() {
        assert_eq!(match_score(&skills(&["A", "B"]), &skills(&["B", "A"])), 100);
        assert_eq!(match_score(&skills(&["A", "B"]), &skills(&["C"])), 0);
    }

    #[test]
    fn test_job_without_skills_scores_zero() {
        assert_eq!(match_score(&[], &skills(&["A"])), 0);
    }

    #[test]
    fn test_curated_zero_falls_back_to_computed() {
        let job = make_job(&["A", "B"], Some(0));
        let result = compute_match(&job, &skills(&["A"]));
        assert_eq!(result.score, 50);
        assert_eq!(result.tier, MatchTier::Low);
    }

    #[test]
    fn test_curated_score_wins_over_computed() {
        let job = make_job(&["A", "B"], Some(94));
        let result = compute_match(&job, &[]);
        assert_eq!(result.score, 94);
        assert_eq!(result.tier, MatchTier::Strong);
        // Alignment is still computed from the skill lists.
        assert_eq!(result.alignment.missing, skills(&["A", "B"]));
    }

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(MatchTier::from_score(80), MatchTier::Strong);
        assert_eq!(MatchTier::from_score(79), MatchTier::Moderate);
        assert_eq!(MatchTier::from_score(60), MatchTier::Moderate);
        assert_eq!(MatchTier::from_score(59), MatchTier::Low);
    }

    #[tokio::test]
    async fn test_scorer_trait_object() {
        let scorer: Box<dyn MatchScorer> = Box::new(SkillOverlapScorer);
        let job = make_job(&["Framing", "Power Tools", "Blueprint Reading", "Safety Procedures"], None);
        let result = scorer
            .score(&job, &skills(&["Framing", "Blueprint Reading"]))
            .await
            .unwrap();
        assert_eq!(result.score, 50);
        assert_eq!(result.tier, MatchTier::Low);
        assert_eq!(scorer.backend(), "skill_overlap");
    }
}
