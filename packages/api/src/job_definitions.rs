//! Job definition server functions.

use console_core::{ApiResult, JobDefinition, JobDefinitionId};
use dioxus::prelude::*;

/// List all job definitions.
#[get("/api/jobdefs")]
pub async fn list_job_definitions() -> Result<ApiResult<Vec<JobDefinition>>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        use db::repositories::JobDefinitionRepository;

        crate::init::ready().await?;
        Ok(crate::init::respond("list job definitions", JobDefinitionRepository::list().await))
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Create a new job definition. The server assigns its id.
#[post("/api/jobdefs/create")]
pub async fn create_job_definition(
    definition: JobDefinition,
) -> Result<ApiResult<JobDefinition>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        use console_core::GridEntity;
        use db::repositories::JobDefinitionRepository;

        crate::init::ready().await?;
        if let Err(e) = definition.validate() {
            return Ok(Err(e.into()));
        }
        Ok(crate::init::respond(
            "create job definition",
            JobDefinitionRepository::create(&definition).await,
        ))
    }

    #[cfg(not(feature = "server"))]
    {
        let _ = definition;
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Replace a job definition.
#[post("/api/jobdefs/:id/update")]
pub async fn update_job_definition(
    id: String,
    definition: JobDefinition,
) -> Result<ApiResult<JobDefinition>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        use console_core::GridEntity;
        use db::repositories::JobDefinitionRepository;

        crate::init::ready().await?;
        if let Err(e) = crate::init::check_path_id(&id, definition.id) {
            return Ok(Err(e));
        }
        if let Err(e) = definition.validate() {
            return Ok(Err(e.into()));
        }
        Ok(crate::init::respond(
            "update job definition",
            JobDefinitionRepository::update(&definition).await,
        ))
    }

    #[cfg(not(feature = "server"))]
    {
        let _ = (id, definition);
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Delete a batch of job definitions. Nothing is deleted if any id is unknown.
#[post("/api/jobdefs/delete")]
pub async fn delete_job_definitions(
    ids: Vec<JobDefinitionId>,
) -> Result<ApiResult<()>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        use db::repositories::JobDefinitionRepository;

        crate::init::ready().await?;
        Ok(crate::init::respond(
            "delete job definitions",
            JobDefinitionRepository::delete_many(&ids).await,
        ))
    }

    #[cfg(not(feature = "server"))]
    {
        let _ = ids;
        Err(ServerFnError::new("Server-only function"))
    }
}
