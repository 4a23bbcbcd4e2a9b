use core_config::{AppInfo, FromEnv, app_info, cors::CorsConfig, server::ServerConfig};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Catalog service configuration, composed from the shared config pieces
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub cors: CorsConfig,
    /// `None` when `DATABASE_URL` is unset; products then live in memory
    pub database: Option<PostgresConfig>,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // HOST=0.0.0.0, PORT=8080 by default
        let cors = CorsConfig::from_env()?;
        let database = PostgresConfig::from_env_optional()?;

        Ok(Self {
            app: app_info!(),
            server,
            cors,
            database,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_to_in_memory_store() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", None::<&str>),
                ("HOST", None),
                ("PORT", None),
                ("CORS_ALLOWED_ORIGIN", None),
                ("APP_ENV", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert!(config.database.is_none());
                assert_eq!(config.server.port, 8080);
                assert!(!config.cors.is_enabled());
                assert_eq!(config.environment, Environment::Development);
                assert_eq!(config.app.name, "catalog_api");
            },
        );
    }

    #[test]
    fn test_config_with_database_url() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgres://u:p@localhost:5432/catalog")),
                ("DB_MAX_CONNECTIONS", Some("5")),
                ("PORT", Some("9090")),
            ],
            || {
                let config = Config::from_env().unwrap();
                let database = config.database.expect("database configured");
                assert_eq!(database.url(), "postgres://u:p@localhost:5432/catalog");
                assert_eq!(database.max_connections, 5);
                assert_eq!(config.server.port, 9090);
            },
        );
    }

    #[test]
    fn test_config_rejects_invalid_port() {
        temp_env::with_vars(
            [("DATABASE_URL", None::<&str>), ("PORT", Some("not-a-port"))],
            || {
                assert!(Config::from_env().is_err());
            },
        );
    }
}
