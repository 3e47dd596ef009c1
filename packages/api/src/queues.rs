//! Queue management server functions.

use console_core::{ApiResult, Queue, QueueId};
use dioxus::prelude::*;

/// List all queues.
#[get("/api/queues")]
pub async fn list_queues() -> Result<ApiResult<Vec<Queue>>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        use db::repositories::QueueRepository;

        crate::init::ready().await?;
        Ok(crate::init::respond("list queues", QueueRepository::list().await))
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Create a new queue. The server assigns its id.
#[post("/api/queues/create")]
pub async fn create_queue(queue: Queue) -> Result<ApiResult<Queue>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        use console_core::GridEntity;
        use db::repositories::QueueRepository;

        crate::init::ready().await?;
        if let Err(e) = queue.validate() {
            return Ok(Err(e.into()));
        }
        Ok(crate::init::respond(
            "create queue",
            QueueRepository::create(&queue).await,
        ))
    }

    #[cfg(not(feature = "server"))]
    {
        let _ = queue;
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Replace a queue.
#[post("/api/queues/:id/update")]
pub async fn update_queue(id: String, queue: Queue) -> Result<ApiResult<Queue>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        use console_core::GridEntity;
        use db::repositories::QueueRepository;

        crate::init::ready().await?;
        if let Err(e) = crate::init::check_path_id(&id, queue.id) {
            return Ok(Err(e));
        }
        if let Err(e) = queue.validate() {
            return Ok(Err(e.into()));
        }
        Ok(crate::init::respond(
            "update queue",
            QueueRepository::update(&queue).await,
        ))
    }

    #[cfg(not(feature = "server"))]
    {
        let _ = (id, queue);
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Delete a batch of queues. Nothing is deleted if any id is unknown.
#[post("/api/queues/delete")]
pub async fn delete_queues(ids: Vec<QueueId>) -> Result<ApiResult<()>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        use db::repositories::QueueRepository;

        crate::init::ready().await?;
        Ok(crate::init::respond(
            "delete queues",
            QueueRepository::delete_many(&ids).await,
        ))
    }

    #[cfg(not(feature = "server"))]
    {
        let _ = ids;
        Err(ServerFnError::new("Server-only function"))
    }
}
