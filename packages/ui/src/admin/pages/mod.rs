//! Full-page admin components.

mod jndi_page;
mod job_definitions_page;
mod queues_page;

pub use jndi_page::AdminJndiPage;
pub use job_definitions_page::AdminJobDefinitionsPage;
pub use queues_page::AdminQueuesPage;
