//! MongoDB gateway for Bookshelf.
//!
//! A single pooled [`Database`] is created at startup from explicit
//! [`DatabaseSettings`] and shared by every request. Its lifecycle is driven
//! by [`DatabaseModule`], which pings before traffic is accepted and drains
//! the pool on shutdown.

use std::time::Duration;

use bookshelf_kernel::settings::DatabaseSettings;
use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};

mod module;

pub use module::DatabaseModule;

/// Errors raised while establishing or checking the database connection.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database connection failed: {reason}")]
    Connection {
        reason: String,
        #[source]
        source: Option<mongodb::error::Error>,
    },
}

impl DbError {
    fn connection(reason: impl Into<String>, source: Option<mongodb::error::Error>) -> Self {
        Self::Connection {
            reason: reason.into(),
            source,
        }
    }
}

/// Handle to the configured logical database, backed by a pooled client.
///
/// Cloning is cheap; all clones share the same pool.
#[derive(Clone, Debug)]
pub struct Database {
    client: Client,
    inner: mongodb::Database,
}

impl Database {
    /// Build the pooled client for `settings.uri` and select `settings.database`.
    ///
    /// No network round-trip happens here beyond SRV resolution for
    /// `mongodb+srv://` strings; use [`Database::ping`] to check reachability.
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, DbError> {
        let uri = settings
            .uri
            .as_deref()
            .map(str::trim)
            .filter(|uri| !uri.is_empty())
            .ok_or_else(|| DbError::connection("connection string is not configured", None))?;

        let mut options = ClientOptions::parse(uri)
            .await
            .map_err(|err| DbError::connection("malformed connection string", Some(err)))?;

        options.app_name = Some(settings.app_name.clone());
        options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
        options.server_selection_timeout =
            Some(Duration::from_millis(settings.server_selection_timeout_ms));

        let client = Client::with_options(options)
            .map_err(|err| DbError::connection("failed to create client", Some(err)))?;
        let inner = client.database(&settings.database);

        tracing::info!(
            target: "bookshelf-db",
            uri = %settings.redacted_uri(),
            database = %settings.database,
            "database client created"
        );

        Ok(Self { client, inner })
    }

    /// Round-trip a `ping` command to confirm the deployment is reachable.
    pub async fn ping(&self) -> Result<(), DbError> {
        self.inner
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(|err| DbError::connection("database is unreachable", Some(err)))
    }

    /// Typed handle to a collection in the configured database.
    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.inner.collection(name)
    }

    /// Name of the selected logical database.
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Drain in-flight operations and close every pooled connection.
    pub async fn shutdown(&self) {
        self.client.clone().shutdown().await;
        tracing::info!(target: "bookshelf-db", database = %self.name(), "database client closed");
    }
}
