use async_trait::async_trait;
use bookshelf_kernel::{InitCtx, Module};

use crate::Database;

/// Core module owning the lifetime of the shared [`Database`] pool.
pub struct DatabaseModule {
    database: Database,
}

impl DatabaseModule {
    pub fn new(database: Database) -> Self {
        Self { database }
    }
}

#[async_trait]
impl Module for DatabaseModule {
    fn name(&self) -> &'static str {
        "db"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        self.database.ping().await?;

        tracing::info!(
            module = self.name(),
            database = %self.database.name(),
            uri = %ctx.settings.database.redacted_uri(),
            "database reachable"
        );
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        self.database.shutdown().await;
        Ok(())
    }
}
