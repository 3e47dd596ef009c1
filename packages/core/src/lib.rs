//! Core types for the job console.
//!
//! This crate contains everything that does not depend on a renderer or on
//! the backend:
//! - Entities (queues, job definitions, JNDI resources) and their validation
//! - The error taxonomy shared by the server functions and the UI
//! - The editable-grid controller and the pure cell renderers

pub mod cells;
mod error;
pub mod grid;
mod ids;
mod jndi;
mod job_definition;
mod parameter;
mod queue;

pub use error::{ApiResult, ConsoleError, ValidationError};
pub use grid::{CrudApi, Draft, FieldValue, GridController, GridEntity, GridMode, Mutation};
pub use ids::{JndiResourceId, JobDefinitionId, QueueId};
pub use jndi::{
    JNDI_TEMPLATES, JndiAuth, JndiField, JndiResource, JndiResourceDraft, JndiResourceTemplate,
};
pub use job_definition::{
    JobDefinition, JobDefinitionDraft, JobDefinitionField, JobSchedule, JobSpecificProperties,
    JobTags, JobType, ShellKind, summarize_schedules,
};
pub use parameter::{Parameter, summarize_parameters, validate_parameters};
pub use queue::{Queue, QueueDraft, QueueField};
