//! Shared application state.

use database::postgres::DatabaseConnection;

/// State handed to route builders and the readiness handler.
///
/// Cloning is cheap: the connection is a pool handle.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL pool, absent when products are kept in memory
    pub db: Option<DatabaseConnection>,
}
