pub mod models;
pub mod routes;
pub mod service;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use serde_json::json;
use shelf_kernel::{InitCtx, Module};

use crate::utils;
use service::BookService;

/// Book endpoints mounted under `/api/v1/book`
pub struct BooksModule {
    service: Arc<BookService>,
}

impl BooksModule {
    pub fn new(service: Arc<BookService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "book"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "book module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.service.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let author_ref = json!({
            "type": "object",
            "properties": {
                "id": { "type": "integer", "format": "int64" },
                "pseudonym": { "type": "string" }
            },
            "required": ["id"]
        });
        let book = json!({
            "type": "object",
            "properties": {
                "id": { "type": "integer", "format": "int64" },
                "title": { "type": "string" },
                "subtitle": { "type": ["string", "null"] },
                "authors": { "type": "array", "items": author_ref.clone() },
                "totalPages": { "type": "integer" },
                "publisher": { "type": "string" },
                "publishedDate": { "type": "string", "format": "date" },
                "isbn13": { "type": "string", "pattern": "^[0-9]{13}$" }
            },
            "required": ["id", "title", "authors", "totalPages", "publisher", "publishedDate", "isbn13"]
        });
        let request = json!({
            "type": "object",
            "properties": {
                "title": { "type": "string", "maxLength": 150 },
                "subtitle": { "type": "string", "maxLength": 150 },
                "authors": { "type": "array", "minItems": 1, "items": author_ref },
                "totalPages": { "type": "integer", "minimum": 1 },
                "publisher": { "type": "string", "maxLength": 100 },
                "publishedDate": { "type": "string", "format": "date" },
                "isbn13": { "type": "string", "pattern": "^[0-9]{13}$" }
            },
            "required": ["title", "authors", "totalPages", "publisher", "publishedDate", "isbn13"]
        });

        Some(utils::crud_openapi("Books", "Book", book, "BookRequest", request))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "book module stopped");
        Ok(())
    }
}

/// Create the book module around its service
pub fn create_module(service: Arc<BookService>) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(service))
}
