// Skill matching between a job seeker and a job posting.
// The scorer is pluggable; handlers only see `Arc<dyn MatchScorer>` from AppState.

pub mod insights;
pub mod scorer;
