use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::token::TokenIssuer;
use crate::config::Config;
use crate::matching::scorer::MatchScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub tokens: TokenIssuer,
    /// Pluggable match scorer. Default: SkillOverlapScorer.
    pub match_scorer: Arc<dyn MatchScorer>,
}

impl AppState {
    pub fn new(db: SqlitePool, config: &Config, match_scorer: Arc<dyn MatchScorer>) -> Self {
        let tokens = TokenIssuer::new(&config.jwt_secret, config.jwt_expires_in_hours);
        Self {
            db,
            tokens,
            match_scorer,
        }
    }

    /// Fresh in-memory database with migrations applied.
    #[cfg(test)]
    pub async fn for_tests() -> Self {
        let config = Config::for_tests();
        let db = crate::db::create_pool(&config.database_url)
            .await
            .expect("in-memory pool");
        Self::new(
            db,
            &config,
            Arc::new(crate::matching::scorer::SkillOverlapScorer),
        )
    }
}
