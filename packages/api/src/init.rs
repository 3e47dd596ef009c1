//! Server initialization for the job console.

use std::fmt::Display;
use std::sync::LazyLock;

use console_core::{ApiResult, ConsoleError};
use db::{DbConfig, DbError, init as init_db, repositories::QueueRepository};
use dioxus::prelude::ServerFnError;
use tokio::sync::OnceCell;

static INITIALIZED: LazyLock<OnceCell<()>> = LazyLock::new(OnceCell::new);

/// Initialize the console backend.
///
/// Connects to the database configured through `CONSOLE_DB_*` variables and
/// seeds a `DEFAULT` queue on an empty database unless
/// `CONSOLE_SEED_DEFAULT_QUEUE` is `false` or `0`.
pub async fn init_console() -> Result<(), DbError> {
    tracing::info!("Initializing job console...");

    init_db(DbConfig::from_env()).await?;

    if seed_enabled(std::env::var("CONSOLE_SEED_DEFAULT_QUEUE").ok().as_deref()) {
        match QueueRepository::seed_default().await {
            Ok(Some(queue)) => tracing::info!("Created default queue: {}", queue.name),
            Ok(None) => {}
            Err(e) => tracing::warn!("Failed to seed default queue: {}", e),
        }
    }

    tracing::info!("Job console initialized");
    Ok(())
}

/// Run [`init_console`] once; later calls return immediately.
pub async fn ensure_initialized() -> Result<(), DbError> {
    INITIALIZED.get_or_try_init(init_console).await?;
    Ok(())
}

fn seed_enabled(value: Option<&str>) -> bool {
    !matches!(
        value.map(str::trim).map(str::to_ascii_lowercase).as_deref(),
        Some("false" | "0" | "no" | "off")
    )
}

/// Initialize the backend or fail the request at the transport level.
pub(crate) async fn ready() -> Result<(), ServerFnError> {
    ensure_initialized()
        .await
        .map_err(|e| ServerFnError::new(format!("Initialization failed: {}", e)))
}

/// Convert a repository result into an in-band API result.
pub(crate) fn respond<T>(operation: &str, result: Result<T, DbError>) -> ApiResult<T> {
    result.map_err(|e| {
        tracing::warn!("{} failed: {}", operation, e);
        ConsoleError::from(e)
    })
}

/// The id in the request path must match the id of the record in the body.
pub(crate) fn check_path_id<I: Display>(path_id: &str, body_id: Option<I>) -> ApiResult<()> {
    match body_id {
        Some(id) if id.to_string() == path_id => Ok(()),
        Some(id) => Err(ConsoleError::validation(
            "id",
            format!("path id {} does not match record id {}", path_id, id),
        )),
        None => Err(ConsoleError::validation("id", "is required")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeding_defaults_to_on() {
        assert!(seed_enabled(None));
        assert!(seed_enabled(Some("true")));
        assert!(!seed_enabled(Some("FALSE")));
        assert!(!seed_enabled(Some("0")));
    }

    #[test]
    fn path_id_must_match_body() {
        assert!(check_path_id("a", Some("a")).is_ok());
        assert!(matches!(
            check_path_id("a", Some("b")),
            Err(ConsoleError::Validation(ref v)) if v.field == "id"
        ));
        assert!(check_path_id::<&str>("a", None).is_err());
    }
}
