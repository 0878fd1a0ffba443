//! HTTP server facade for Shelf with Axum, the response envelope, and OpenAPI support.

use anyhow::Context;
use axum::{routing::get, Router};

use shelf_kernel::{settings::Settings, ModuleRegistry};

pub mod error;
pub mod extract;
pub mod response;
pub mod router;
pub mod validation;

pub use error::AppError;
pub use extract::{EntityId, Pageable, ValidJson};
pub use response::{send_message, send_one, send_page, send_response, Envelope, PageMetadata};
pub use validation::{FieldError, Validate, Violations};

use router::RouterBuilder;

/// Start the HTTP server and serve until Ctrl-C
pub async fn start_server(registry: &ModuleRegistry, settings: &Settings) -> anyhow::Result<()> {
    let app = build_router(registry, settings).context("failed to build HTTP router")?;

    let address = settings.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind to {}", address))?;

    tracing::info!("HTTP server listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

/// Build the main HTTP router with all module routes mounted
pub fn build_router(registry: &ModuleRegistry, settings: &Settings) -> anyhow::Result<Router> {
    let mut router_builder = RouterBuilder::new().route("/healthz", get(health_check));

    for module in registry.modules() {
        tracing::info!(
            module = module.name(),
            "mounting module routes under {}/{}",
            router::API_PREFIX,
            module.name()
        );
        router_builder = router_builder.mount_module(module.name(), module.routes());
    }

    let router = router_builder
        .with_openapi(registry)
        .with_pagination(settings.pagination.clone())
        .with_timeout(settings.server.request_timeout_ms)
        .with_cors(settings.server.cors_origin.as_deref())?
        .with_tracing()
        .with_request_id()
        .build();

    Ok(router)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "ok"
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
