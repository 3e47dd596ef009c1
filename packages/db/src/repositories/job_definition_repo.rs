//! Job definition repository.

use std::collections::BTreeMap;

use console_core::{
    JobDefinition, JobDefinitionId, JobSchedule, JobSpecificProperties, JobTags, Parameter,
    QueueId,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use surrealdb::sql::Thing;

use super::{count, delete_batch, parse_key, record_exists};
use crate::repositories::QueueRepository;
use crate::{DbError, get_db};

const TABLE: &str = "job_definition";

/// Repository for job definition persistence operations.
pub struct JobDefinitionRepository;

#[derive(Debug, Deserialize)]
struct JobDefinitionRecord {
    id: Option<Thing>,
    application_name: String,
    #[serde(default)]
    description: String,
    queue_id: Option<QueueId>,
    enabled: bool,
    highlander: bool,
    can_be_restarted: bool,
    properties: JobSpecificProperties,
    #[serde(default)]
    tags: JobTags,
    #[serde(default)]
    parameters: Vec<Parameter>,
    #[serde(default)]
    schedules: Vec<JobSchedule>,
}

impl JobDefinitionRecord {
    fn into_definition(self) -> Option<JobDefinition> {
        let id = parse_key(TABLE, self.id.as_ref(), JobDefinitionId::parse)?;
        Some(JobDefinition {
            id: Some(id),
            application_name: self.application_name,
            description: self.description,
            queue_id: self.queue_id,
            enabled: self.enabled,
            highlander: self.highlander,
            can_be_restarted: self.can_be_restarted,
            properties: self.properties,
            tags: self.tags,
            parameters: self.parameters,
            schedules: self.schedules,
        })
    }
}

/// Stored fields of a job definition; the record id carries the identity.
#[derive(Debug, Clone, Serialize)]
struct JobDefinitionContent {
    application_name: String,
    description: String,
    queue_id: Option<QueueId>,
    enabled: bool,
    highlander: bool,
    can_be_restarted: bool,
    properties: JobSpecificProperties,
    tags: JobTags,
    parameters: Vec<Parameter>,
    schedules: Vec<JobSchedule>,
}

impl From<&JobDefinition> for JobDefinitionContent {
    fn from(def: &JobDefinition) -> Self {
        Self {
            application_name: def.application_name.trim().to_string(),
            description: def.description.clone(),
            queue_id: def.queue_id,
            enabled: def.enabled,
            highlander: def.highlander,
            can_be_restarted: def.can_be_restarted,
            properties: def.properties.clone(),
            tags: def.tags.clone().normalized(),
            parameters: def.parameters.clone(),
            schedules: def.schedules.clone(),
        }
    }
}

impl JobDefinitionRepository {
    /// Create a new job definition and assign it an id.
    pub async fn create(def: &JobDefinition) -> Result<JobDefinition, DbError> {
        let db = get_db()?;
        let id = JobDefinitionId::new();

        Self::check_references(def, None).await?;

        let record: Option<JobDefinitionRecord> = db
            .create((TABLE, id.to_string()))
            .content(JobDefinitionContent::from(def))
            .await?;

        tracing::info!("Created job definition {} ({})", def.application_name, id);

        record
            .and_then(JobDefinitionRecord::into_definition)
            .ok_or_else(|| DbError::Query("Failed to create job definition".into()))
    }

    /// Get a job definition by ID.
    pub async fn get(id: JobDefinitionId) -> Result<JobDefinition, DbError> {
        let db = get_db()?;

        let record: Option<JobDefinitionRecord> = db.select((TABLE, id.to_string())).await?;

        record
            .and_then(JobDefinitionRecord::into_definition)
            .ok_or_else(|| DbError::NotFound(format!("Job definition not found: {}", id)))
    }

    /// List all job definitions ordered by application name.
    pub async fn list() -> Result<Vec<JobDefinition>, DbError> {
        let db = get_db()?;

        let mut result = db
            .query("SELECT * FROM job_definition ORDER BY application_name")
            .await?;
        let records: Vec<JobDefinitionRecord> = result.take(0)?;

        Ok(records
            .into_iter()
            .filter_map(JobDefinitionRecord::into_definition)
            .collect())
    }

    /// Replace a job definition.
    pub async fn update(def: &JobDefinition) -> Result<JobDefinition, DbError> {
        let db = get_db()?;
        let id = def
            .id
            .ok_or_else(|| DbError::constraint("id", "is required"))?;

        if !Self::exists(id).await? {
            return Err(DbError::NotFound(format!("Job definition not found: {}", id)));
        }
        Self::check_references(def, Some(id)).await?;

        let record: Option<JobDefinitionRecord> = db
            .update((TABLE, id.to_string()))
            .content(JobDefinitionContent::from(def))
            .await?;

        record
            .and_then(JobDefinitionRecord::into_definition)
            .ok_or_else(|| DbError::NotFound(format!("Job definition not found: {}", id)))
    }

    /// Delete a batch of job definitions; all or nothing.
    pub async fn delete_many(ids: &[JobDefinitionId]) -> Result<(), DbError> {
        let keys: Vec<String> = ids.iter().map(ToString::to_string).collect();
        delete_batch(TABLE, &keys).await
    }

    /// Check if a job definition exists.
    pub async fn exists(id: JobDefinitionId) -> Result<bool, DbError> {
        record_exists(TABLE, id.to_string()).await
    }

    /// Reject duplicate application names and unknown queues.
    async fn check_references(
        def: &JobDefinition,
        except: Option<JobDefinitionId>,
    ) -> Result<(), DbError> {
        let mut bindings = BTreeMap::new();
        bindings.insert("name".to_string(), json!(def.application_name.trim()));
        let sql = match except {
            Some(id) => {
                bindings.insert("id".to_string(), json!(id.to_string()));
                "SELECT count() FROM job_definition WHERE application_name = $name \
                 AND id != type::thing('job_definition', $id) GROUP ALL"
            }
            None => "SELECT count() FROM job_definition WHERE application_name = $name GROUP ALL",
        };
        if count(sql, bindings).await? > 0 {
            return Err(DbError::constraint(
                "application_name",
                "a job definition with this name already exists",
            ));
        }

        let queues = def
            .queue_id
            .iter()
            .chain(def.schedules.iter().filter_map(|s| s.queue_id.as_ref()));
        for queue_id in queues {
            if !QueueRepository::exists(*queue_id).await? {
                return Err(DbError::constraint(
                    "queue_id",
                    format!("unknown queue {}", queue_id),
                ));
            }
        }
        Ok(())
    }
}
