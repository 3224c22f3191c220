use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{fmt, time::Duration};
use tracing::info;

use crate::database::infrastructure::postgres::{
    PostgresEnrollmentsRepository, PostgresMediaRecordsRepository,
    PostgresProjectsRepository, PostgresSessionsRepository,
};
use crate::error::{FolioError, Result};

const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Clone)]
pub struct PostgresDatabase {
    pool: PgPool,
    max_connections: u32,
}

impl fmt::Debug for PostgresDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresDatabase")
            .field("pool_size", &self.pool.size())
            .field("idle_connections", &self.pool.num_idle())
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl PostgresDatabase {
    pub async fn new(
        connection_string: &str,
        max_connections: Option<u32>,
    ) -> Result<Self> {
        let max_connections =
            max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS).max(1);

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(connection_string)
            .await
            .map_err(|e| {
                FolioError::Database(format!(
                    "Database connection failed: {e}"
                ))
            })?;

        info!(max_connections, "Database pool initialized");

        Ok(Self {
            pool,
            max_connections,
        })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        let max_connections = pool.options().get_max_connections();
        Self {
            pool,
            max_connections,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply pending migrations from `folio-core/migrations`.
    pub async fn initialize_schema(&self) -> Result<()> {
        crate::MIGRATOR.run(&self.pool).await.map_err(|e| {
            FolioError::Database(format!("Failed to run migrations: {e}"))
        })?;
        Ok(())
    }

    pub fn media_records_repository(&self) -> PostgresMediaRecordsRepository {
        PostgresMediaRecordsRepository::new(self.pool.clone())
    }

    pub fn projects_repository(&self) -> PostgresProjectsRepository {
        PostgresProjectsRepository::new(self.pool.clone())
    }

    pub fn sessions_repository(&self) -> PostgresSessionsRepository {
        PostgresSessionsRepository::new(self.pool.clone())
    }

    pub fn enrollments_repository(&self) -> PostgresEnrollmentsRepository {
        PostgresEnrollmentsRepository::new(self.pool.clone())
    }
}
