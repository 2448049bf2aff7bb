//! Shelf application library
//!
//! Wires the books module into the kernel registry and runs the HTTP server.

pub mod modules;

use anyhow::Context;
use shelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};

/// Re-export commonly used types
pub use modules::*;

/// Build a registry with every module registered and initialized.
pub async fn bootstrap(settings: &Settings) -> anyhow::Result<ModuleRegistry> {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, settings);

    let ctx = InitCtx { settings };
    registry
        .init_all(&ctx)
        .await
        .context("module initialization failed")?;

    Ok(registry)
}

/// Run the service until a shutdown signal arrives.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    tracing::info!(
        env = ?settings.environment,
        data_file = %settings.storage.data_file.display(),
        "shelf bootstrap starting"
    );

    let registry = bootstrap(&settings).await?;

    tracing::info!(modules = registry.module_count(), "shelf bootstrap complete");

    let served = shelf_http::start_server(&registry, &settings).await;
    registry.stop_all().await?;
    served
}
