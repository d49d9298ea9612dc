//! Multi-criteria filtering and sorting over the job list.
//!
//! Every predicate is applied in a fixed order, then one sort key. The output is
//! always a subset of the input; ties keep their input order.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::models::job::{Job, JobType};

pub const DEFAULT_SALARY_MAX: i64 = 100_000;
pub const DEFAULT_EXPERIENCE_MAX: i64 = 10;
const ALL_LOCATIONS: &str = "all";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Match,
    Recent,
    Salary,
}

impl SortBy {
    pub fn parse(raw: &str) -> Option<SortBy> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "match" => Some(SortBy::Match),
            "recent" => Some(SortBy::Recent),
            "salary" => Some(SortBy::Salary),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobFilters {
    pub search: String,
    pub location: String,
    pub types: Vec<JobType>,
    pub salary_min: i64,
    pub salary_max: i64,
    pub experience_min: i64,
    pub experience_max: i64,
    pub skills: Vec<String>,
    pub sort_by: SortBy,
}

impl Default for JobFilters {
    fn default() -> Self {
        Self {
            search: String::new(),
            location: ALL_LOCATIONS.to_string(),
            types: Vec::new(),
            salary_min: 0,
            salary_max: DEFAULT_SALARY_MAX,
            experience_min: 0,
            experience_max: DEFAULT_EXPERIENCE_MAX,
            skills: Vec::new(),
            sort_by: SortBy::Match,
        }
    }
}

impl JobFilters {
    /// Resets every criterion. The sort key is kept.
    #[allow(dead_code)]
    pub fn clear(&mut self) {
        let sort_by = self.sort_by;
        *self = JobFilters {
            sort_by,
            ..JobFilters::default()
        };
    }

    /// True when any criterion narrows the list. Sorting alone does not count.
    pub fn has_active_filters(&self) -> bool {
        !self.search.is_empty()
            || (!self.location.is_empty() && self.location != ALL_LOCATIONS)
            || !self.types.is_empty()
            || self.salary_min > 0
            || self.salary_max < DEFAULT_SALARY_MAX
            || self.experience_min > 0
            || self.experience_max < DEFAULT_EXPERIENCE_MAX
            || !self.skills.is_empty()
    }
}

/// A job paired with the score used for `SortBy::Match`.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredJob {
    pub job: Job,
    pub match_score: Option<u32>,
}

pub fn apply_filters(jobs: Vec<ScoredJob>, filters: &JobFilters) -> Vec<ScoredJob> {
    let query = filters.search.to_lowercase();
    let location_filter = !filters.location.is_empty() && filters.location != ALL_LOCATIONS;

    let mut out: Vec<ScoredJob> = jobs
        .into_iter()
        .filter(|s| query.is_empty() || matches_search(&s.job, &query))
        .filter(|s| !location_filter || s.job.location == filters.location)
        .filter(|s| filters.types.is_empty() || filters.types.contains(&s.job.job_type))
        .filter(|s| {
            s.job.salary.min >= filters.salary_min && s.job.salary.max <= filters.salary_max
        })
        .filter(|s| {
            s.job.experience.min >= filters.experience_min
                && s.job.experience.max <= filters.experience_max
        })
        .filter(|s| {
            filters.skills.is_empty() || filters.skills.iter().any(|k| s.job.skills.contains(k))
        })
        .collect();

    sort_jobs(&mut out, filters.sort_by);
    out
}

/// Stable, descending sort on the chosen key.
pub fn sort_jobs(jobs: &mut [ScoredJob], sort_by: SortBy) {
    match sort_by {
        SortBy::Match => jobs.sort_by_key(|s| Reverse(s.match_score.unwrap_or(0))),
        SortBy::Recent => jobs.sort_by_key(|s| Reverse(s.job.posted_at)),
        SortBy::Salary => jobs.sort_by_key(|s| Reverse(s.job.salary.max)),
    }
}

fn matches_search(job: &Job, query: &str) -> bool {
    job.title.to_lowercase().contains(query)
        || job.company.to_lowercase().contains(query)
        || job.skills.iter().any(|k| k.to_lowercase().contains(query))
}
