//! JNDI resource server functions.

use console_core::{ApiResult, JndiResource, JndiResourceId};
use dioxus::prelude::*;

/// List all JNDI resources.
#[get("/api/jndi")]
pub async fn list_jndi_resources() -> Result<ApiResult<Vec<JndiResource>>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        use db::repositories::JndiRepository;

        crate::init::ready().await?;
        Ok(crate::init::respond("list JNDI resources", JndiRepository::list().await))
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Create a new JNDI resource. The server assigns its id.
#[post("/api/jndi/create")]
pub async fn create_jndi_resource(
    resource: JndiResource,
) -> Result<ApiResult<JndiResource>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        use console_core::GridEntity;
        use db::repositories::JndiRepository;

        crate::init::ready().await?;
        if let Err(e) = resource.validate() {
            return Ok(Err(e.into()));
        }
        Ok(crate::init::respond(
            "create JNDI resource",
            JndiRepository::create(&resource).await,
        ))
    }

    #[cfg(not(feature = "server"))]
    {
        let _ = resource;
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Replace a JNDI resource.
#[post("/api/jndi/:id/update")]
pub async fn update_jndi_resource(
    id: String,
    resource: JndiResource,
) -> Result<ApiResult<JndiResource>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        use console_core::GridEntity;
        use db::repositories::JndiRepository;

        crate::init::ready().await?;
        if let Err(e) = crate::init::check_path_id(&id, resource.id) {
            return Ok(Err(e));
        }
        if let Err(e) = resource.validate() {
            return Ok(Err(e.into()));
        }
        Ok(crate::init::respond(
            "update JNDI resource",
            JndiRepository::update(&resource).await,
        ))
    }

    #[cfg(not(feature = "server"))]
    {
        let _ = (id, resource);
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Delete a batch of JNDI resources. Nothing is deleted if any id is unknown.
#[post("/api/jndi/delete")]
pub async fn delete_jndi_resources(
    ids: Vec<JndiResourceId>,
) -> Result<ApiResult<()>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        use db::repositories::JndiRepository;

        crate::init::ready().await?;
        Ok(crate::init::respond(
            "delete JNDI resources",
            JndiRepository::delete_many(&ids).await,
        ))
    }

    #[cfg(not(feature = "server"))]
    {
        let _ = ids;
        Err(ServerFnError::new("Server-only function"))
    }
}
