//! Server API functions for the job console.
//!
//! This crate contains the shared fullstack server functions for:
//! - Queues (`/api/queues`)
//! - Job definitions (`/api/jobdefs`)
//! - JNDI resources (`/api/jndi`)
//!
//! and the client adapters plugging them into the grid controller.

mod client;
mod jndi;
mod job_definitions;
mod queues;

#[cfg(feature = "server")]
mod init;

pub use client::{JndiApi, JobDefinitionApi, QueueApi};

// Re-export all server functions
pub use jndi::*;
pub use job_definitions::*;
pub use queues::*;

#[cfg(feature = "server")]
pub use init::*;

// Re-export core types for convenience
pub use console_core::{
    ApiResult, ConsoleError, JndiResource, JndiResourceId, JobDefinition, JobDefinitionId, Queue,
    QueueId,
};
