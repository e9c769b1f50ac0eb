use deadpool_postgres::Pool;
use std::sync::Arc;
use crate::config::Config;
use crate::crypto::jwt::TokenService;
use crate::error::Result;

/// The application's state.
#[derive(Clone)]
pub struct AppState {
    /// The database connection pool.
    pub db: Pool,
    /// The application's configuration.
    pub config: Arc<Config>,
    /// Signs and verifies session tokens.
    pub tokens: Arc<TokenService>,
}

impl AppState {
    /// Creates a new `AppState`.
    ///
    /// The pool connects lazily, so this does not touch the database.
    pub fn new(config: &Config) -> Result<Self> {
        let db = crate::db::create_pool(&config.database_url)?;
        tracing::info!("✅ PostgreSQL pool initialized");

        let tokens = TokenService::new(
            config.jwt_secret.as_bytes(),
            chrono::Duration::days(config.token_ttl_days),
        );
        tracing::info!("✅ Token service initialized ({} day tokens)", config.token_ttl_days);

        Ok(AppState {
            db,
            config: Arc::new(config.clone()),
            tokens: Arc::new(tokens),
        })
    }
}
