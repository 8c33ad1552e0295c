//! Application state - shared across all handlers.

use std::sync::Arc;

use agora_core::ports::CredentialVerifier;
use agora_core::services::Services;
use agora_infra::{Repositories, StaticCredentialStore};

use crate::config::{AppConfig, AuthConfig};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    pub credentials: Arc<dyn CredentialVerifier>,
    /// Which store backs the repositories, reported by the health check.
    pub storage: &'static str,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    ///
    /// A configured database that cannot be reached or migrated is fatal.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let (repositories, storage) = build_repositories(config).await?;
        let state = Self::from_parts(repositories, storage, &config.auth);

        tracing::info!(storage, "Application state initialized");
        Ok(state)
    }

    /// State over a fresh in-memory store.
    #[cfg(test)]
    pub fn in_memory(auth: &AuthConfig) -> Self {
        Self::from_parts(Repositories::in_memory(), "memory", auth)
    }

    fn from_parts(repositories: Repositories, storage: &'static str, auth: &AuthConfig) -> Self {
        let credentials = StaticCredentialStore::new(auth.credentials.clone());
        tracing::debug!(accounts = credentials.len(), "Credential store loaded");

        Self {
            services: repositories.into_services(),
            credentials: Arc::new(credentials),
            storage,
        }
    }
}

#[cfg(feature = "postgres")]
async fn build_repositories(config: &AppConfig) -> anyhow::Result<(Repositories, &'static str)> {
    use anyhow::Context;
    use migration::{Migrator, MigratorTrait};

    let Some(db_config) = config.database.as_ref() else {
        tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        return Ok((Repositories::in_memory(), "memory"));
    };

    let conn = agora_infra::database::connect(db_config)
        .await
        .context("failed to connect to database")?;

    if db_config.auto_migrate {
        Migrator::up(&conn, None)
            .await
            .context("failed to apply migrations")?;
        tracing::info!("Database migrations applied");
    }

    Ok((Repositories::postgres(conn), "postgres"))
}

#[cfg(not(feature = "postgres"))]
async fn build_repositories(config: &AppConfig) -> anyhow::Result<(Repositories, &'static str)> {
    if config.database.is_some() {
        tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
    }
    tracing::info!("Running without postgres feature - using in-memory repositories");
    Ok((Repositories::in_memory(), "memory"))
}
