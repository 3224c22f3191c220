use async_trait::async_trait;
use folio_model::{ServiceID, StudentID};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::database::ports::enrollments::EnrollmentsRepository;
use crate::error::{FolioError, Result};

#[derive(Debug, Clone)]
pub struct PostgresEnrollmentsRepository {
    pool: PgPool,
}

impl PostgresEnrollmentsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EnrollmentsRepository for PostgresEnrollmentsRepository {
    async fn services_for_student(
        &self,
        student_id: StudentID,
    ) -> Result<Vec<ServiceID>> {
        let rows = sqlx::query(
            r#"
            SELECT service_id
            FROM service_enrollments
            WHERE student_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(student_id.to_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            FolioError::Database(format!(
                "Failed to list student services: {e}"
            ))
        })?;

        rows.iter()
            .map(|row| {
                row.try_get::<Uuid, _>("service_id").map(ServiceID).map_err(
                    |e| {
                        FolioError::Database(format!(
                            "Failed to read service_id: {e}"
                        ))
                    },
                )
            })
            .collect()
    }

    async fn link(
        &self,
        service_id: ServiceID,
        student_id: StudentID,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO service_enrollments (service_id, student_id)
            VALUES ($1, $2)
            ON CONFLICT (service_id, student_id) DO NOTHING
            "#,
        )
        .bind(service_id.to_uuid())
        .bind(student_id.to_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            FolioError::Database(format!("Failed to link service: {e}"))
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn unlink_except(
        &self,
        student_id: StudentID,
        keep: &[ServiceID],
    ) -> Result<u64> {
        let keep: Vec<Uuid> = keep.iter().map(ServiceID::to_uuid).collect();
        let result = sqlx::query(
            r#"
            DELETE FROM service_enrollments
            WHERE student_id = $1
              AND NOT (service_id = ANY($2))
            "#,
        )
        .bind(student_id.to_uuid())
        .bind(&keep)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            FolioError::Database(format!("Failed to unlink services: {e}"))
        })?;

        Ok(result.rows_affected())
    }
}
