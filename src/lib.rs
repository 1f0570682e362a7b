//! Bookshelf application library
//!
//! Wires settings, the shared database pool, and the project modules into a
//! running HTTP service.

pub mod modules;
pub mod utils;

use std::sync::Arc;

use anyhow::Context;
use bookshelf_db::{Database, DatabaseModule};
use bookshelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};

/// Re-export commonly used types
pub use modules::*;

/// Connect to the database, bring every module up, and serve HTTP until a
/// shutdown signal arrives. Modules are stopped (and the pool closed) on the
/// way out, including when serving fails.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let database = Database::connect(&settings.database)
        .await
        .context("failed to configure database client")?;

    let mut registry = ModuleRegistry::new();
    registry.register_core(Arc::new(DatabaseModule::new(database.clone())));
    modules::register_all(&mut registry, &database, &settings);

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    let served = bookshelf_http::start_server(&registry, &settings).await;
    let stopped = registry.stop_all().await;

    served?;
    stopped
}
