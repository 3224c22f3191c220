use async_trait::async_trait;
use chrono::{DateTime, Utc};
use folio_model::UserID;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::database::ports::sessions::SessionsRepository;
use crate::error::{FolioError, Result};

#[derive(Debug, Clone)]
pub struct PostgresSessionsRepository {
    pool: PgPool,
}

impl PostgresSessionsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionsRepository for PostgresSessionsRepository {
    async fn find_active_user(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<UserID>> {
        let row = sqlx::query(
            r#"
            SELECT user_id
            FROM auth_sessions
            WHERE token_hash = $1
              AND revoked_at IS NULL
              AND expires_at > $2
            "#,
        )
        .bind(token_hash)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            FolioError::Database(format!("Failed to validate session: {e}"))
        })?;

        row.map(|row| {
            row.try_get::<Uuid, _>("user_id").map(UserID).map_err(|e| {
                FolioError::Database(format!("Failed to read user_id: {e}"))
            })
        })
        .transpose()
    }
}
