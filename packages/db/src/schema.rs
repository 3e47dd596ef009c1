//! Database schema definitions using SurrealQL.

use crate::{DbError, get_db};

/// Initialize the database schema.
///
/// This creates all necessary tables, fields, and indexes.
pub async fn init_schema() -> Result<(), DbError> {
    let db = get_db()?;

    tracing::info!("Initializing database schema...");

    db.query(QUEUE_SCHEMA).await?.check()?;
    db.query(JOB_DEFINITION_SCHEMA).await?.check()?;
    db.query(JNDI_RESOURCE_SCHEMA).await?.check()?;

    tracing::info!("Database schema initialized");

    Ok(())
}

/// Queue table schema.
const QUEUE_SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS queue SCHEMAFULL;

DEFINE FIELD IF NOT EXISTS name ON queue TYPE string;
DEFINE FIELD IF NOT EXISTS description ON queue TYPE string;
DEFINE FIELD IF NOT EXISTS default_queue ON queue TYPE bool DEFAULT false;

DEFINE INDEX IF NOT EXISTS queue_name ON queue FIELDS name UNIQUE;
"#;

/// Job definition table schema. Composite fields (properties, tags,
/// parameters, schedules) are free-form, so the table is schemaless with
/// typed top-level fields.
const JOB_DEFINITION_SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS job_definition SCHEMALESS;

DEFINE FIELD IF NOT EXISTS application_name ON job_definition TYPE string;
DEFINE FIELD IF NOT EXISTS description ON job_definition TYPE string DEFAULT "";
DEFINE FIELD IF NOT EXISTS queue_id ON job_definition TYPE option<string>;
DEFINE FIELD IF NOT EXISTS enabled ON job_definition TYPE bool DEFAULT true;
DEFINE FIELD IF NOT EXISTS highlander ON job_definition TYPE bool DEFAULT false;
DEFINE FIELD IF NOT EXISTS can_be_restarted ON job_definition TYPE bool DEFAULT true;
DEFINE FIELD IF NOT EXISTS properties ON job_definition TYPE object;
DEFINE FIELD IF NOT EXISTS parameters ON job_definition TYPE array DEFAULT [];
DEFINE FIELD IF NOT EXISTS schedules ON job_definition TYPE array DEFAULT [];

DEFINE INDEX IF NOT EXISTS job_definition_name ON job_definition FIELDS application_name UNIQUE;
DEFINE INDEX IF NOT EXISTS job_definition_queue ON job_definition FIELDS queue_id;
"#;

/// JNDI resource table schema.
const JNDI_RESOURCE_SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS jndi_resource SCHEMALESS;

DEFINE FIELD IF NOT EXISTS name ON jndi_resource TYPE string;
DEFINE FIELD IF NOT EXISTS type ON jndi_resource TYPE string;
DEFINE FIELD IF NOT EXISTS factory ON jndi_resource TYPE string;
DEFINE FIELD IF NOT EXISTS description ON jndi_resource TYPE string DEFAULT "";
DEFINE FIELD IF NOT EXISTS singleton ON jndi_resource TYPE bool DEFAULT false;
DEFINE FIELD IF NOT EXISTS auth ON jndi_resource TYPE string DEFAULT "container";
DEFINE FIELD IF NOT EXISTS parameters ON jndi_resource TYPE array DEFAULT [];

DEFINE INDEX IF NOT EXISTS jndi_resource_name ON jndi_resource FIELDS name UNIQUE;
"#;
