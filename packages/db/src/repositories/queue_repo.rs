//! Queue repository for CRUD operations.

use std::collections::BTreeMap;

use console_core::{Queue, QueueId};
use serde::{Deserialize, Serialize};
use serde_json::json;
use surrealdb::sql::Thing;

use super::{count, delete_batch, parse_key, record_exists};
use crate::{DbError, get_db};

const TABLE: &str = "queue";

/// Repository for queue persistence operations.
pub struct QueueRepository;

/// Internal record type for SurrealDB reads.
#[derive(Debug, Deserialize)]
struct QueueRecord {
    id: Option<Thing>,
    name: String,
    description: String,
    #[serde(default)]
    default_queue: bool,
}

impl QueueRecord {
    fn into_queue(self) -> Option<Queue> {
        let id = parse_key(TABLE, self.id.as_ref(), QueueId::parse)?;
        Some(Queue {
            id: Some(id),
            name: self.name,
            description: self.description,
            default_queue: self.default_queue,
        })
    }
}

/// Struct for creating/updating queues.
#[derive(Debug, Clone, Serialize)]
struct QueueContent {
    name: String,
    description: String,
    default_queue: bool,
}

impl From<&Queue> for QueueContent {
    fn from(queue: &Queue) -> Self {
        Self {
            name: queue.name.trim().to_string(),
            description: queue.description.clone(),
            default_queue: queue.default_queue,
        }
    }
}

impl QueueRepository {
    /// Create a new queue and assign it an id.
    pub async fn create(queue: &Queue) -> Result<Queue, DbError> {
        let db = get_db()?;
        let queue_id = QueueId::new();

        if Self::name_taken(&queue.name, None).await? {
            return Err(DbError::constraint("name", "a queue with this name already exists"));
        }
        if queue.default_queue {
            Self::write_as_default(queue_id, QueueContent::from(queue), "CREATE").await?;
            tracing::info!("Created default queue {} ({})", queue.name, queue_id);
            return Self::get(queue_id).await;
        }

        let record: Option<QueueRecord> = db
            .create((TABLE, queue_id.to_string()))
            .content(QueueContent::from(queue))
            .await?;

        tracing::info!("Created queue {} ({})", queue.name, queue_id);

        record
            .and_then(QueueRecord::into_queue)
            .ok_or_else(|| DbError::Query("Failed to create queue".into()))
    }

    /// Get a queue by ID.
    pub async fn get(id: QueueId) -> Result<Queue, DbError> {
        let db = get_db()?;

        let record: Option<QueueRecord> = db.select((TABLE, id.to_string())).await?;

        record
            .and_then(QueueRecord::into_queue)
            .ok_or_else(|| DbError::NotFound(format!("Queue not found: {}", id)))
    }

    /// List all queues ordered by name.
    pub async fn list() -> Result<Vec<Queue>, DbError> {
        let db = get_db()?;

        let mut result = db.query("SELECT * FROM queue ORDER BY name").await?;
        let records: Vec<QueueRecord> = result.take(0)?;

        Ok(records
            .into_iter()
            .filter_map(QueueRecord::into_queue)
            .collect())
    }

    /// Replace a queue's fields.
    ///
    /// Marking the queue as default clears the flag on every other queue.
    pub async fn update(queue: &Queue) -> Result<Queue, DbError> {
        let db = get_db()?;
        let id = queue
            .id
            .ok_or_else(|| DbError::constraint("id", "is required"))?;

        if !Self::exists(id).await? {
            return Err(DbError::NotFound(format!("Queue not found: {}", id)));
        }
        if Self::name_taken(&queue.name, Some(id)).await? {
            return Err(DbError::constraint("name", "a queue with this name already exists"));
        }
        if queue.default_queue {
            Self::write_as_default(id, QueueContent::from(queue), "UPDATE").await?;
            return Self::get(id).await;
        }

        let record: Option<QueueRecord> = db
            .update((TABLE, id.to_string()))
            .content(QueueContent::from(queue))
            .await?;

        record
            .and_then(QueueRecord::into_queue)
            .ok_or_else(|| DbError::NotFound(format!("Queue not found: {}", id)))
    }

    /// Delete a batch of queues. Queues still used by a job definition
    /// cannot be deleted.
    pub async fn delete_many(ids: &[QueueId]) -> Result<(), DbError> {
        let keys: Vec<String> = ids.iter().map(ToString::to_string).collect();

        let mut bindings = BTreeMap::new();
        bindings.insert("ids".to_string(), json!(keys));
        let users = count(
            "SELECT count() FROM job_definition \
             WHERE queue_id IN $ids OR schedules.queue_id CONTAINSANY $ids GROUP ALL",
            bindings,
        )
        .await?;
        if users > 0 {
            return Err(DbError::constraint(
                "queue_id",
                format!("queue is used by {} job definition(s)", users),
            ));
        }

        delete_batch(TABLE, &keys).await
    }

    /// Check if a queue exists.
    pub async fn exists(id: QueueId) -> Result<bool, DbError> {
        record_exists(TABLE, id.to_string()).await
    }

    /// Check if another queue already uses this name.
    pub async fn name_taken(name: &str, except: Option<QueueId>) -> Result<bool, DbError> {
        let mut bindings = BTreeMap::new();
        bindings.insert("name".to_string(), json!(name.trim()));
        let sql = match except {
            Some(id) => {
                bindings.insert("id".to_string(), json!(id.to_string()));
                "SELECT count() FROM queue WHERE name = $name \
                 AND id != type::thing('queue', $id) GROUP ALL"
            }
            None => "SELECT count() FROM queue WHERE name = $name GROUP ALL",
        };
        Ok(count(sql, bindings).await? > 0)
    }

    /// Seed a `DEFAULT` queue when the table is empty. Returns the created
    /// queue, if any.
    pub async fn seed_default() -> Result<Option<Queue>, DbError> {
        let total = count("SELECT count() FROM queue GROUP ALL", BTreeMap::new()).await?;
        if total > 0 {
            return Ok(None);
        }
        let queue = Queue::new("DEFAULT", "Default queue").as_default();
        Self::create(&queue).await.map(Some)
    }

    /// Run `statement` (`CREATE` or `UPDATE`) for the queue and clear the
    /// default flag on every other queue, in one transaction. If the write
    /// fails the previous default is kept.
    async fn write_as_default(
        id: QueueId,
        content: QueueContent,
        statement: &'static str,
    ) -> Result<(), DbError> {
        let db = get_db()?;
        let sql = format!(
            "BEGIN TRANSACTION;\n\
             UPDATE queue SET default_queue = false \
             WHERE default_queue = true AND id != type::thing('queue', $id);\n\
             {} type::thing('queue', $id) CONTENT $content;\n\
             COMMIT TRANSACTION;",
            statement
        );
        db.query(sql)
            .bind(("id", id.to_string()))
            .bind(("content", content))
            .await?
            .check()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::disallowed_methods)]

    use super::*;
    use crate::DbConfig;

    #[tokio::test]
    async fn failed_default_write_keeps_previous_default() {
        crate::init(DbConfig::memory()).await.unwrap();
        let first = QueueRepository::create(&Queue::new("first", "one").as_default())
            .await
            .unwrap();
        let second = QueueRepository::create(&Queue::new("second", "two"))
            .await
            .unwrap();

        // Renaming onto an existing name trips the unique index inside the
        // transaction, after the flag reset already ran.
        let clash = Queue {
            name: "first".into(),
            ..second.clone().as_default()
        };
        let result = QueueRepository::write_as_default(
            second.id.unwrap(),
            QueueContent::from(&clash),
            "UPDATE",
        )
        .await;
        assert!(result.is_err());

        let first = QueueRepository::get(first.id.unwrap()).await.unwrap();
        assert!(first.default_queue);
        let second = QueueRepository::get(second.id.unwrap()).await.unwrap();
        assert!(!second.default_queue);
        assert_eq!(second.name, "second");
    }
}
