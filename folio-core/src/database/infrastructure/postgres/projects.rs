use async_trait::async_trait;
use folio_model::{Project, ProjectID};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::database::ports::projects::ProjectsRepository;
use crate::error::{FolioError, Result};

#[derive(Debug, Clone)]
pub struct PostgresProjectsRepository {
    pool: PgPool,
}

impl PostgresProjectsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_row(row: &PgRow) -> Result<Project> {
        let read = |column: &str, e: sqlx::Error| {
            FolioError::Database(format!("Failed to read {column}: {e}"))
        };

        Ok(Project {
            id: ProjectID(
                row.try_get::<Uuid, _>("id").map_err(|e| read("id", e))?,
            ),
            title: row.try_get("title").map_err(|e| read("title", e))?,
            description: row
                .try_get("description")
                .map_err(|e| read("description", e))?,
            tags: row.try_get("tags").map_err(|e| read("tags", e))?,
            drive_folder_url: row
                .try_get("drive_folder_url")
                .map_err(|e| read("drive_folder_url", e))?,
            thumbnail_url: row
                .try_get("thumbnail_url")
                .map_err(|e| read("thumbnail_url", e))?,
            sort_order: row
                .try_get("sort_order")
                .map_err(|e| read("sort_order", e))?,
        })
    }
}

#[async_trait]
impl ProjectsRepository for PostgresProjectsRepository {
    async fn get_project(&self, id: ProjectID) -> Result<Option<Project>> {
        let row = sqlx::query(
            r#"
            SELECT
                id,
                title,
                description,
                tags,
                drive_folder_url,
                thumbnail_url,
                sort_order
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id.to_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            FolioError::Database(format!("Failed to load project: {e}"))
        })?;

        row.map(|row| Self::map_row(&row)).transpose()
    }
}
