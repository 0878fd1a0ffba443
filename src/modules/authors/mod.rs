pub mod models;
pub mod routes;
pub mod service;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use serde_json::json;
use shelf_kernel::{InitCtx, Module};

use crate::utils;
use service::AuthorService;

/// Author endpoints mounted under `/api/v1/author`
pub struct AuthorsModule {
    service: Arc<AuthorService>,
}

impl AuthorsModule {
    pub fn new(service: Arc<AuthorService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Module for AuthorsModule {
    fn name(&self) -> &'static str {
        "author"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "author module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.service.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let author = json!({
            "type": "object",
            "properties": {
                "id": { "type": "integer", "format": "int64" },
                "name": { "type": "string" },
                "pseudonym": { "type": "string" },
                "nationality": { "type": "string" },
                "birthDate": { "type": "string", "format": "date" }
            },
            "required": ["id", "name", "pseudonym", "nationality", "birthDate"]
        });
        let request = json!({
            "type": "object",
            "properties": {
                "name": { "type": "string", "maxLength": 100 },
                "pseudonym": { "type": "string", "maxLength": 100 },
                "nationality": { "type": "string", "maxLength": 60 },
                "birthDate": { "type": "string", "format": "date" }
            },
            "required": ["name", "pseudonym", "nationality", "birthDate"]
        });

        Some(utils::crud_openapi(
            "Authors",
            "Author",
            author,
            "AuthorRequest",
            request,
        ))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "author module stopped");
        Ok(())
    }
}

/// Create the author module around its service
pub fn create_module(service: Arc<AuthorService>) -> Arc<dyn Module> {
    Arc::new(AuthorsModule::new(service))
}
