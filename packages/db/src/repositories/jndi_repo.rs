//! JNDI resource repository.

use std::collections::BTreeMap;

use console_core::{JndiAuth, JndiResource, JndiResourceId, Parameter};
use serde::{Deserialize, Serialize};
use serde_json::json;
use surrealdb::sql::Thing;

use super::{count, delete_batch, parse_key, record_exists};
use crate::{DbError, get_db};

const TABLE: &str = "jndi_resource";

/// Repository for JNDI resource persistence operations.
pub struct JndiRepository;

#[derive(Debug, Deserialize)]
struct JndiRecord {
    id: Option<Thing>,
    name: String,
    #[serde(rename = "type")]
    resource_type: String,
    factory: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    singleton: bool,
    #[serde(default)]
    auth: JndiAuth,
    #[serde(default)]
    parameters: Vec<Parameter>,
}

impl JndiRecord {
    fn into_resource(self) -> Option<JndiResource> {
        let id = parse_key(TABLE, self.id.as_ref(), JndiResourceId::parse)?;
        Some(JndiResource {
            id: Some(id),
            name: self.name,
            resource_type: self.resource_type,
            factory: self.factory,
            description: self.description,
            singleton: self.singleton,
            auth: self.auth,
            parameters: self.parameters,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
struct JndiContent {
    name: String,
    #[serde(rename = "type")]
    resource_type: String,
    factory: String,
    description: String,
    singleton: bool,
    auth: JndiAuth,
    parameters: Vec<Parameter>,
}

impl From<&JndiResource> for JndiContent {
    fn from(resource: &JndiResource) -> Self {
        Self {
            name: resource.name.trim().to_string(),
            resource_type: resource.resource_type.trim().to_string(),
            factory: resource.factory.trim().to_string(),
            description: resource.description.clone(),
            singleton: resource.singleton,
            auth: resource.auth,
            parameters: resource.parameters.clone(),
        }
    }
}

impl JndiRepository {
    /// Create a new JNDI resource and assign it an id.
    pub async fn create(resource: &JndiResource) -> Result<JndiResource, DbError> {
        let db = get_db()?;
        let id = JndiResourceId::new();

        if Self::name_taken(&resource.name, None).await? {
            return Err(DbError::constraint("name", "a resource with this name already exists"));
        }

        let record: Option<JndiRecord> = db
            .create((TABLE, id.to_string()))
            .content(JndiContent::from(resource))
            .await?;

        tracing::info!("Created JNDI resource {} ({})", resource.name, id);

        record
            .and_then(JndiRecord::into_resource)
            .ok_or_else(|| DbError::Query("Failed to create JNDI resource".into()))
    }

    /// Get a JNDI resource by ID.
    pub async fn get(id: JndiResourceId) -> Result<JndiResource, DbError> {
        let db = get_db()?;

        let record: Option<JndiRecord> = db.select((TABLE, id.to_string())).await?;

        record
            .and_then(JndiRecord::into_resource)
            .ok_or_else(|| DbError::NotFound(format!("JNDI resource not found: {}", id)))
    }

    /// List all JNDI resources ordered by name.
    pub async fn list() -> Result<Vec<JndiResource>, DbError> {
        let db = get_db()?;

        let mut result = db
            .query("SELECT * FROM jndi_resource ORDER BY name")
            .await?;
        let records: Vec<JndiRecord> = result.take(0)?;

        Ok(records
            .into_iter()
            .filter_map(JndiRecord::into_resource)
            .collect())
    }

    /// Replace a JNDI resource.
    pub async fn update(resource: &JndiResource) -> Result<JndiResource, DbError> {
        let db = get_db()?;
        let id = resource
            .id
            .ok_or_else(|| DbError::constraint("id", "is required"))?;

        if !Self::exists(id).await? {
            return Err(DbError::NotFound(format!("JNDI resource not found: {}", id)));
        }
        if Self::name_taken(&resource.name, Some(id)).await? {
            return Err(DbError::constraint("name", "a resource with this name already exists"));
        }

        let record: Option<JndiRecord> = db
            .update((TABLE, id.to_string()))
            .content(JndiContent::from(resource))
            .await?;

        record
            .and_then(JndiRecord::into_resource)
            .ok_or_else(|| DbError::NotFound(format!("JNDI resource not found: {}", id)))
    }

    /// Delete a batch of JNDI resources; all or nothing.
    pub async fn delete_many(ids: &[JndiResourceId]) -> Result<(), DbError> {
        let keys: Vec<String> = ids.iter().map(ToString::to_string).collect();
        delete_batch(TABLE, &keys).await
    }

    /// Check if a JNDI resource exists.
    pub async fn exists(id: JndiResourceId) -> Result<bool, DbError> {
        record_exists(TABLE, id.to_string()).await
    }

    /// Check if another resource already uses this JNDI alias.
    pub async fn name_taken(name: &str, except: Option<JndiResourceId>) -> Result<bool, DbError> {
        let mut bindings = BTreeMap::new();
        bindings.insert("name".to_string(), json!(name.trim()));
        let sql = match except {
            Some(id) => {
                bindings.insert("id".to_string(), json!(id.to_string()));
                "SELECT count() FROM jndi_resource WHERE name = $name \
                 AND id != type::thing('jndi_resource', $id) GROUP ALL"
            }
            None => "SELECT count() FROM jndi_resource WHERE name = $name GROUP ALL",
        };
        Ok(count(sql, bindings).await? > 0)
    }
}
