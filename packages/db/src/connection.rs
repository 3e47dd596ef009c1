//! Database connection management with lazy initialization.

use std::sync::LazyLock;

use console_core::ConsoleError;
use surrealdb::Surreal;
use surrealdb::engine::any::{Any, connect};
use surrealdb::opt::auth::Root;
use thiserror::Error;
use tokio::sync::OnceCell;

/// Global database instance using lazy initialization.
static DB: LazyLock<OnceCell<Surreal<Any>>> = LazyLock::new(OnceCell::new);

/// Database connection wrapper.
pub type Database = Surreal<Any>;

/// Database configuration.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Connection endpoint: "mem://", "file://path", "rocksdb://path", "ws://host"
    pub endpoint: String,
    /// Namespace to use
    pub namespace: String,
    /// Database name to use
    pub database: String,
    /// Optional root credentials for authentication
    pub credentials: Option<(String, String)>,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            endpoint: "mem://".to_string(),
            namespace: "console".to_string(),
            database: "main".to_string(),
            credentials: None,
        }
    }
}

impl DbConfig {
    /// Create a config for in-memory testing.
    pub fn memory() -> Self {
        Self::default()
    }

    /// Connect to `endpoint`, e.g. `rocksdb://./data` (requires the rocksdb
    /// feature) or `ws://host:8000`.
    pub fn at(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// Build a config from `CONSOLE_DB_*` environment variables.
    ///
    /// Unset variables keep their in-memory defaults. Credentials are only
    /// used when both user and password are present.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = match lookup("CONSOLE_DB_ENDPOINT") {
            Some(endpoint) => Self::at(endpoint),
            None => Self::default(),
        };
        if let Some(namespace) = lookup("CONSOLE_DB_NAMESPACE") {
            config = config.with_namespace(namespace);
        }
        if let Some(database) = lookup("CONSOLE_DB_DATABASE") {
            config = config.with_database(database);
        }
        if let (Some(user), Some(password)) =
            (lookup("CONSOLE_DB_USER"), lookup("CONSOLE_DB_PASSWORD"))
        {
            config = config.with_credentials(user, password);
        }
        config
    }

    /// Set the namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the database name.
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Set root credentials for authentication.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some((username.into(), password.into()));
        self
    }
}

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Database not initialized - call init_db first")]
    NotInitialized,
    #[error("Connection error: {0}")]
    Connection(#[from] surrealdb::Error),
    #[error("Query error: {0}")]
    Query(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Constraint violated on {field}: {message}")]
    Constraint { field: String, message: String },
}

impl DbError {
    pub fn constraint(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Constraint {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<DbError> for ConsoleError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound(what) => ConsoleError::NotFound(what),
            DbError::Constraint { field, message } => ConsoleError::validation(field, message),
            other => ConsoleError::Server(other.to_string()),
        }
    }
}

/// Initialize the database connection.
///
/// This should be called once at application startup before any database operations.
pub async fn init_db(config: DbConfig) -> Result<&'static Database, DbError> {
    DB.get_or_try_init(|| async {
        tracing::info!("Connecting to database: {}", config.endpoint);

        let db = connect(&config.endpoint).await?;

        // Authenticate if credentials provided
        if let Some((username, password)) = &config.credentials {
            db.signin(Root { username, password }).await?;
        }

        db.use_ns(&config.namespace).use_db(&config.database).await?;

        tracing::info!(
            "Connected to database: {}/{}",
            config.namespace,
            config.database
        );

        Ok(db)
    })
    .await
}

/// Get the database connection.
pub fn get_db() -> Result<&'static Database, DbError> {
    DB.get().ok_or(DbError::NotInitialized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides_defaults() {
        let config = DbConfig::from_lookup(|key| match key {
            "CONSOLE_DB_ENDPOINT" => Some("rocksdb://./data".to_string()),
            "CONSOLE_DB_USER" => Some("root".to_string()),
            _ => None,
        });
        assert_eq!(config.endpoint, "rocksdb://./data");
        assert_eq!(config.namespace, "console");
        // Password missing, so no credentials.
        assert!(config.credentials.is_none());
    }

    #[test]
    fn env_credentials_need_user_and_password() {
        let config = DbConfig::from_lookup(|key| match key {
            "CONSOLE_DB_NAMESPACE" => Some("ops".to_string()),
            "CONSOLE_DB_USER" => Some("root".to_string()),
            "CONSOLE_DB_PASSWORD" => Some("secret".to_string()),
            _ => None,
        });
        assert_eq!(config.endpoint, "mem://");
        assert_eq!(config.namespace, "ops");
        assert_eq!(config.database, "main");
        assert_eq!(
            config.credentials,
            Some(("root".to_string(), "secret".to_string()))
        );
    }

    #[test]
    fn errors_map_to_console_taxonomy() {
        let e: ConsoleError = DbError::NotFound("queue x".into()).into();
        assert_eq!(e, ConsoleError::NotFound("queue x".into()));
        let e: ConsoleError = DbError::constraint("queue_id", "in use").into();
        assert!(matches!(e, ConsoleError::Validation(v) if v.field == "queue_id"));
        let e: ConsoleError = DbError::NotInitialized.into();
        assert!(matches!(e, ConsoleError::Server(_)));
    }
}
