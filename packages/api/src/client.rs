//! [`CrudApi`] adapters over the server functions.
//!
//! Transport failures (`ServerFnError`) surface as [`ConsoleError::Network`];
//! domain failures arrive in-band and pass through unchanged.

use console_core::{
    ApiResult, ConsoleError, CrudApi, JndiResource, JndiResourceId, JobDefinition,
    JobDefinitionId, Queue, QueueId,
};
use dioxus::prelude::ServerFnError;

use crate::{
    create_jndi_resource, create_job_definition, create_queue, delete_jndi_resources,
    delete_job_definitions, delete_queues, list_jndi_resources, list_job_definitions,
    list_queues, update_jndi_resource, update_job_definition, update_queue,
};

/// Queue endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueApi;

/// Job definition endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JobDefinitionApi;

/// JNDI resource endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JndiApi;

fn flatten<T>(response: Result<ApiResult<T>, ServerFnError>) -> ApiResult<T> {
    response.map_err(|e| ConsoleError::Network(e.to_string()))?
}

fn path_id<I: ToString>(id: Option<I>) -> ApiResult<String> {
    id.map(|id| id.to_string())
        .ok_or_else(|| ConsoleError::validation("id", "is required"))
}

impl CrudApi<Queue> for QueueApi {
    async fn fetch(&self) -> Result<Vec<Queue>, ConsoleError> {
        flatten(list_queues().await)
    }

    async fn create(&self, draft: Queue) -> Result<Queue, ConsoleError> {
        flatten(create_queue(draft).await)
    }

    async fn update(&self, entity: Queue) -> Result<Queue, ConsoleError> {
        let id = path_id(entity.id)?;
        flatten(update_queue(id, entity).await)
    }

    async fn delete(&self, ids: Vec<QueueId>) -> Result<(), ConsoleError> {
        flatten(delete_queues(ids).await)
    }
}

impl CrudApi<JobDefinition> for JobDefinitionApi {
    async fn fetch(&self) -> Result<Vec<JobDefinition>, ConsoleError> {
        flatten(list_job_definitions().await)
    }

    async fn create(&self, draft: JobDefinition) -> Result<JobDefinition, ConsoleError> {
        flatten(create_job_definition(draft).await)
    }

    async fn update(&self, entity: JobDefinition) -> Result<JobDefinition, ConsoleError> {
        let id = path_id(entity.id)?;
        flatten(update_job_definition(id, entity).await)
    }

    async fn delete(&self, ids: Vec<JobDefinitionId>) -> Result<(), ConsoleError> {
        flatten(delete_job_definitions(ids).await)
    }
}

impl CrudApi<JndiResource> for JndiApi {
    async fn fetch(&self) -> Result<Vec<JndiResource>, ConsoleError> {
        flatten(list_jndi_resources().await)
    }

    async fn create(&self, draft: JndiResource) -> Result<JndiResource, ConsoleError> {
        flatten(create_jndi_resource(draft).await)
    }

    async fn update(&self, entity: JndiResource) -> Result<JndiResource, ConsoleError> {
        let id = path_id(entity.id)?;
        flatten(update_jndi_resource(id, entity).await)
    }

    async fn delete(&self, ids: Vec<JndiResourceId>) -> Result<(), ConsoleError> {
        flatten(delete_jndi_resources(ids).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_errors_become_network_errors() {
        let response: Result<ApiResult<()>, ServerFnError> = Err(ServerFnError::new("timed out"));
        assert!(matches!(flatten(response), Err(ConsoleError::Network(m)) if m.contains("timed out")));
    }

    #[test]
    fn domain_errors_pass_through() {
        let response: Result<ApiResult<()>, ServerFnError> =
            Ok(Err(ConsoleError::NotFound("queue".into())));
        assert_eq!(flatten(response), Err(ConsoleError::NotFound("queue".into())));
    }

    #[test]
    fn update_needs_an_id() {
        assert!(matches!(
            path_id::<QueueId>(None),
            Err(ConsoleError::Validation(ref v)) if v.field == "id"
        ));
    }
}
