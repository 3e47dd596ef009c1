//! Repository implementations for database operations.

mod jndi_repo;
mod job_definition_repo;
mod queue_repo;

pub use jndi_repo::JndiRepository;
pub use job_definition_repo::JobDefinitionRepository;
pub use queue_repo::QueueRepository;

use std::collections::BTreeMap;

use serde::Deserialize;
use surrealdb::sql::Thing;

use crate::{DbError, get_db};

/// Projection used for existence checks.
#[derive(Debug, Deserialize)]
struct RecordKey {
    #[allow(dead_code)]
    id: Thing,
}

#[derive(Deserialize)]
struct CountResult {
    count: i64,
}

/// Raw key of a SurrealDB record id, e.g. `01H..` for `queue:01H..`.
pub(crate) fn record_key(id: Option<&Thing>) -> Option<String> {
    id.map(|t| t.id.to_raw())
}

/// Parse a record key into a typed id, logging records that cannot be mapped.
pub(crate) fn parse_key<T, E>(
    table: &str,
    id: Option<&Thing>,
    parse: impl Fn(&str) -> Result<T, E>,
) -> Option<T> {
    let key = record_key(id)?;
    match parse(&key) {
        Ok(id) => Some(id),
        Err(_) => {
            tracing::warn!("Skipping {} record with malformed id: {}", table, key);
            None
        }
    }
}

/// Does a record with this key exist in `table`?
pub(crate) async fn record_exists(table: &'static str, key: String) -> Result<bool, DbError> {
    let db = get_db()?;
    let record: Option<RecordKey> = db.select((table, key)).await?;
    Ok(record.is_some())
}

/// Run a `SELECT count() ... GROUP ALL` query.
pub(crate) async fn count(
    sql: &'static str,
    bindings: BTreeMap<String, serde_json::Value>,
) -> Result<i64, DbError> {
    let db = get_db()?;
    let mut result = db.query(sql).bind(bindings).await?;
    let counts: Vec<CountResult> = result.take(0)?;
    Ok(counts.first().map_or(0, |c| c.count))
}

/// Delete a batch of records atomically.
///
/// Every key is checked first; if any is missing nothing is deleted and the
/// missing keys are reported.
pub(crate) async fn delete_batch(table: &'static str, keys: &[String]) -> Result<(), DbError> {
    let mut missing = Vec::new();
    for key in keys {
        if !record_exists(table, key.clone()).await? {
            missing.push(key.clone());
        }
    }
    if !missing.is_empty() {
        return Err(DbError::NotFound(format!(
            "{} not found: {}",
            table,
            missing.join(", ")
        )));
    }
    if keys.is_empty() {
        return Ok(());
    }

    let mut sql = String::from("BEGIN TRANSACTION;\n");
    let mut bindings = BTreeMap::new();
    bindings.insert("table".to_string(), table.to_string());
    for (i, key) in keys.iter().enumerate() {
        sql.push_str(&format!("DELETE type::thing($table, $id{});\n", i));
        bindings.insert(format!("id{}", i), key.clone());
    }
    sql.push_str("COMMIT TRANSACTION;");

    let db = get_db()?;
    db.query(sql).bind(bindings).await?.check()?;

    tracing::info!("Deleted {} {} record(s)", keys.len(), table);
    Ok(())
}
