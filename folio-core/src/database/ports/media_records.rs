use async_trait::async_trait;
use folio_model::{MediaFields, MediaRecord, MediaRecordID, ProjectID};

use crate::Result;

/// Storage for a project's media gallery.
///
/// Rows are keyed by `(project_id, drive_file_id)` for Drive-backed media.
#[async_trait]
pub trait MediaRecordsRepository: Send + Sync {
    async fn find_by_drive_file(
        &self,
        project_id: ProjectID,
        drive_file_id: &str,
    ) -> Result<Option<MediaRecord>>;

    async fn insert_drive_record(
        &self,
        project_id: ProjectID,
        drive_file_id: &str,
        fields: &MediaFields,
    ) -> Result<MediaRecord>;

    async fn update_fields(
        &self,
        id: MediaRecordID,
        fields: &MediaFields,
    ) -> Result<()>;

    /// Drive-backed records of the project whose file id is not in `keep`.
    async fn find_stale_drive_records(
        &self,
        project_id: ProjectID,
        keep: &[String],
    ) -> Result<Vec<MediaRecord>>;

    async fn delete_many(&self, ids: &[MediaRecordID]) -> Result<u64>;

    /// Every record of the project, Drive-backed first in `sort_order`.
    async fn list_for_project(
        &self,
        project_id: ProjectID,
    ) -> Result<Vec<MediaRecord>>;
}
