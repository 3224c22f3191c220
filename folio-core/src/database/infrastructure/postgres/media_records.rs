use async_trait::async_trait;
use folio_model::{MediaFields, MediaRecord, MediaRecordID, ProjectID};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::database::ports::media_records::MediaRecordsRepository;
use crate::error::{FolioError, Result};

const MEDIA_COLUMNS: &str = r#"
    id,
    project_id,
    drive_file_id,
    file_name,
    mime_type,
    thumbnail_url,
    web_view_url,
    sort_order
"#;

#[derive(Debug, Clone)]
pub struct PostgresMediaRecordsRepository {
    pool: PgPool,
}

impl PostgresMediaRecordsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn map_row(row: &PgRow) -> Result<MediaRecord> {
        let read = |column: &str, e: sqlx::Error| {
            FolioError::Database(format!("Failed to read {column}: {e}"))
        };

        Ok(MediaRecord {
            id: MediaRecordID(
                row.try_get::<Uuid, _>("id").map_err(|e| read("id", e))?,
            ),
            project_id: ProjectID(
                row.try_get::<Uuid, _>("project_id")
                    .map_err(|e| read("project_id", e))?,
            ),
            drive_file_id: row
                .try_get("drive_file_id")
                .map_err(|e| read("drive_file_id", e))?,
            file_name: row
                .try_get("file_name")
                .map_err(|e| read("file_name", e))?,
            mime_type: row
                .try_get("mime_type")
                .map_err(|e| read("mime_type", e))?,
            thumbnail_url: row
                .try_get("thumbnail_url")
                .map_err(|e| read("thumbnail_url", e))?,
            web_view_url: row
                .try_get("web_view_url")
                .map_err(|e| read("web_view_url", e))?,
            sort_order: row
                .try_get("sort_order")
                .map_err(|e| read("sort_order", e))?,
        })
    }
}

#[async_trait]
impl MediaRecordsRepository for PostgresMediaRecordsRepository {
    async fn find_by_drive_file(
        &self,
        project_id: ProjectID,
        drive_file_id: &str,
    ) -> Result<Option<MediaRecord>> {
        let sql = format!(
            "SELECT {MEDIA_COLUMNS} FROM media_records \
             WHERE project_id = $1 AND drive_file_id = $2"
        );
        let row = sqlx::query(&sql)
            .bind(project_id.to_uuid())
            .bind(drive_file_id)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| {
                FolioError::Database(format!(
                    "Failed to look up media record: {e}"
                ))
            })?;

        row.map(|row| Self::map_row(&row)).transpose()
    }

    async fn insert_drive_record(
        &self,
        project_id: ProjectID,
        drive_file_id: &str,
        fields: &MediaFields,
    ) -> Result<MediaRecord> {
        let sql = format!(
            r#"
            INSERT INTO media_records (
                id, project_id, drive_file_id, file_name, mime_type,
                thumbnail_url, web_view_url, sort_order
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {MEDIA_COLUMNS}
            "#
        );
        let row = sqlx::query(&sql)
            .bind(MediaRecordID::new().to_uuid())
            .bind(project_id.to_uuid())
            .bind(drive_file_id)
            .bind(&fields.file_name)
            .bind(&fields.mime_type)
            .bind(&fields.thumbnail_url)
            .bind(&fields.web_view_url)
            .bind(fields.sort_order)
            .fetch_one(self.pool())
            .await
            .map_err(|e| {
                FolioError::Database(format!(
                    "Failed to insert media record: {e}"
                ))
            })?;

        Self::map_row(&row)
    }

    async fn update_fields(
        &self,
        id: MediaRecordID,
        fields: &MediaFields,
    ) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE media_records
            SET
                file_name = $2,
                mime_type = $3,
                thumbnail_url = $4,
                web_view_url = $5,
                sort_order = $6,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id.to_uuid())
        .bind(&fields.file_name)
        .bind(&fields.mime_type)
        .bind(&fields.thumbnail_url)
        .bind(&fields.web_view_url)
        .bind(fields.sort_order)
        .execute(self.pool())
        .await
        .map_err(|e| {
            FolioError::Database(format!("Failed to update media record: {e}"))
        })?;

        if result.rows_affected() == 0 {
            return Err(FolioError::NotFound(format!("media record {id}")));
        }

        Ok(())
    }

    async fn find_stale_drive_records(
        &self,
        project_id: ProjectID,
        keep: &[String],
    ) -> Result<Vec<MediaRecord>> {
        let sql = format!(
            "SELECT {MEDIA_COLUMNS} FROM media_records \
             WHERE project_id = $1 \
               AND drive_file_id IS NOT NULL \
               AND NOT (drive_file_id = ANY($2)) \
             ORDER BY sort_order"
        );
        let rows = sqlx::query(&sql)
            .bind(project_id.to_uuid())
            .bind(keep)
            .fetch_all(self.pool())
            .await
            .map_err(|e| {
                FolioError::Database(format!(
                    "Failed to load stale media records: {e}"
                ))
            })?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn delete_many(&self, ids: &[MediaRecordID]) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let ids: Vec<Uuid> = ids.iter().map(MediaRecordID::to_uuid).collect();
        let result = sqlx::query("DELETE FROM media_records WHERE id = ANY($1)")
            .bind(&ids)
            .execute(self.pool())
            .await
            .map_err(|e| {
                FolioError::Database(format!(
                    "Failed to delete media records: {e}"
                ))
            })?;

        Ok(result.rows_affected())
    }

    async fn list_for_project(
        &self,
        project_id: ProjectID,
    ) -> Result<Vec<MediaRecord>> {
        let sql = format!(
            "SELECT {MEDIA_COLUMNS} FROM media_records \
             WHERE project_id = $1 \
             ORDER BY drive_file_id IS NULL, sort_order, file_name"
        );
        let rows = sqlx::query(&sql)
            .bind(project_id.to_uuid())
            .fetch_all(self.pool())
            .await
            .map_err(|e| {
                FolioError::Database(format!(
                    "Failed to list project media: {e}"
                ))
            })?;

        rows.iter().map(Self::map_row).collect()
    }
}
