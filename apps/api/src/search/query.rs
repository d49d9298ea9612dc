use serde::Deserialize;

use crate::errors::AppError;
use crate::models::job::JobType;
use crate::search::filters::{JobFilters, SortBy};

/// Query-string form of `JobFilters`. List fields are comma-separated.
#[derive(Debug, Default, Deserialize)]
pub struct JobSearchQuery {
    pub search: Option<String>,
    pub location: Option<String>,
    pub types: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub experience_min: Option<i64>,
    pub experience_max: Option<i64>,
    pub skills: Option<String>,
    pub sort_by: Option<String>,
}

impl TryFrom<JobSearchQuery> for JobFilters {
    type Error = AppError;

    fn try_from(q: JobSearchQuery) -> Result<Self, Self::Error> {
        let defaults = JobFilters::default();

        let types = split_list(q.types.as_deref())
            .into_iter()
            .map(|raw| {
                JobType::parse(&raw)
                    .ok_or_else(|| AppError::Validation(format!("Unknown job type '{raw}'")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let sort_by = match q.sort_by.as_deref().map(str::trim) {
            None | Some("") => defaults.sort_by,
            Some(raw) => SortBy::parse(raw).ok_or_else(|| {
                AppError::Validation(format!(
                    "Unknown sort_by '{raw}': expected match, recent, or salary"
                ))
            })?,
        };

        let filters = JobFilters {
            search: q.search.map(|s| s.trim().to_string()).unwrap_or_default(),
            location: q
                .location
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.location),
            types,
            salary_min: q.salary_min.unwrap_or(defaults.salary_min),
            salary_max: q.salary_max.unwrap_or(defaults.salary_max),
            experience_min: q.experience_min.unwrap_or(defaults.experience_min),
            experience_max: q.experience_max.unwrap_or(defaults.experience_max),
            skills: split_list(q.skills.as_deref()),
            sort_by,
        };

        if filters.salary_min > filters.salary_max {
            return Err(AppError::Validation(
                "salary_min cannot exceed salary_max".to_string(),
            ));
        }
        if filters.experience_min > filters.experience_max {
            return Err(AppError::Validation(
                "experience_min cannot exceed experience_max".to_string(),
            ));
        }

        Ok(filters)
    }
}

fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_yields_defaults() {
        let filters = JobFilters::try_from(JobSearchQuery::default()).unwrap();
        assert_eq!(filters, JobFilters::default());
    }

    #[test]
    fn test_lists_are_comma_separated_and_trimmed() {
        let q = JobSearchQuery {
            types: Some("full-time, contract".to_string()),
            skills: Some("MIG Welding,, TIG Welding ".to_string()),
            ..Default::default()
        };
        let f = JobFilters::try_from(q).unwrap();
        assert_eq!(f.types, vec![JobType::FullTime, JobType::Contract]);
        assert_eq!(f.skills, vec!["MIG Welding", "TIG Welding"]);
    }

    #[test]
    fn test_unknown_sort_rejected() {
        let q = JobSearchQuery {
            sort_by: Some("alphabetical".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            JobFilters::try_from(q),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_unknown_type_rejected() {
        let q = JobSearchQuery {
            types: Some("seasonal".to_string()),
            ..Default::default()
        };
        assert!(JobFilters::try_from(q).is_err());
    }

    #[test]
    fn test_inverted_ranges_rejected() {
        let q = JobSearchQuery {
            salary_min: Some(90_000),
            salary_max: Some(50_000),
            ..Default::default()
        };
        assert!(JobFilters::try_from(q).is_err());
    }
}
