//! Shelf application library
//!
//! Author and book modules plus the bootstrap that wires them into the HTTP server.

pub mod modules;
pub mod utils;

use anyhow::Context;
use shelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};

/// Registry holding every application module
pub fn build_registry() -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry);
    registry
}

/// Initialize modules, serve HTTP until shutdown, then stop modules
pub async fn run(settings: &Settings) -> anyhow::Result<()> {
    let registry = build_registry();
    let ctx = InitCtx { settings };

    registry
        .init_all(&ctx)
        .await
        .context("module initialization failed")?;
    registry
        .start_all(&ctx)
        .await
        .context("module start failed")?;

    let served = shelf_http::start_server(&registry, settings).await;

    registry.stop_all().await.context("module shutdown failed")?;
    served
}
