use folio_model::{DriveFolderId, MediaFields, MediaRecordID, ProjectID};
use std::{fmt, sync::Arc};
use tracing::{info, warn};

use super::{ProjectLocks, ReconcileError};
use crate::api::types::DriveSyncRequest;
use crate::auth::AuthenticatedUser;
use crate::database::ports::media_records::MediaRecordsRepository;
use crate::drive::{FolderListing, folder_id_from_url};

/// What a single run changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Size of the authoritative listing.
    pub files_count: usize,
    pub inserted: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub deleted: u64,
    /// The listing hit the page cap; files past it were not seen.
    pub truncated: bool,
}

/// Converges a project's Drive-backed media records to a Drive folder.
///
/// Records without a `drive_file_id` are never read for staleness nor
/// written. Runs for the same project are serialized.
#[derive(Clone)]
pub struct MediaReconciler {
    media: Arc<dyn MediaRecordsRepository>,
    drive: Arc<dyn FolderListing>,
    locks: ProjectLocks,
}

impl fmt::Debug for MediaReconciler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaReconciler")
            .field("drive_configured", &self.drive.is_configured())
            .field("locks", &self.locks)
            .finish()
    }
}

impl MediaReconciler {
    pub fn new(
        media: Arc<dyn MediaRecordsRepository>,
        drive: Arc<dyn FolderListing>,
    ) -> Self {
        Self {
            media,
            drive,
            locks: ProjectLocks::new(),
        }
    }

    /// Validate a raw sync request and run it.
    pub async fn reconcile(
        &self,
        caller: Option<&AuthenticatedUser>,
        request: &DriveSyncRequest,
    ) -> Result<ReconcileOutcome, ReconcileError> {
        let caller = caller.ok_or(ReconcileError::Unauthorized)?;

        let folder_url = non_empty(request.folder_url.as_deref())
            .ok_or_else(|| ReconcileError::MissingInput("folderUrl".into()))?;
        let project_id = non_empty(request.project_id.as_deref())
            .ok_or_else(|| ReconcileError::MissingInput("projectId".into()))?
            .parse::<ProjectID>()
            .map_err(|_| {
                ReconcileError::MissingInput("projectId (not a valid id)".into())
            })?;

        self.reconcile_folder(caller, folder_url, project_id).await
    }

    /// Run against an already identified project.
    pub async fn reconcile_folder(
        &self,
        caller: &AuthenticatedUser,
        folder_url: &str,
        project_id: ProjectID,
    ) -> Result<ReconcileOutcome, ReconcileError> {
        let folder = folder_id_from_url(folder_url)
            .ok_or(ReconcileError::InvalidFolderUrl)?;

        if !self.drive.is_configured() {
            return Err(ReconcileError::IntegrationNotConfigured);
        }

        info!(
            user_id = %caller.user_id,
            project_id = %project_id,
            folder = %folder,
            "starting Drive media sync"
        );

        let result = self.run(&folder, project_id).await;
        match &result {
            Ok(outcome) => info!(
                project_id = %project_id,
                files = outcome.files_count,
                inserted = outcome.inserted,
                updated = outcome.updated,
                unchanged = outcome.unchanged,
                deleted = outcome.deleted,
                truncated = outcome.truncated,
                "Drive media sync complete"
            ),
            Err(error) => warn!(
                project_id = %project_id,
                error = %error,
                "Drive media sync failed"
            ),
        }
        result
    }

    async fn run(
        &self,
        folder: &DriveFolderId,
        project_id: ProjectID,
    ) -> Result<ReconcileOutcome, ReconcileError> {
        let _guard = self.locks.acquire(project_id).await;

        let listing = self.drive.list_folder(folder).await?;
        let mut outcome = ReconcileOutcome {
            files_count: listing.entries.len(),
            truncated: listing.truncated,
            ..ReconcileOutcome::default()
        };

        for (index, entry) in listing.entries.iter().enumerate() {
            let sort_order = i32::try_from(index).map_err(|_| {
                ReconcileError::Storage(format!(
                    "listing position {index} exceeds sort_order range"
                ))
            })?;
            let fields = MediaFields::from_entry(entry, sort_order);

            match self.media.find_by_drive_file(project_id, &entry.id).await? {
                Some(existing) if existing.matches(&fields) => {
                    outcome.unchanged += 1;
                }
                Some(existing) => {
                    self.media.update_fields(existing.id, &fields).await?;
                    outcome.updated += 1;
                }
                None => {
                    self.media
                        .insert_drive_record(project_id, &entry.id, &fields)
                        .await?;
                    outcome.inserted += 1;
                }
            }
        }

        let keep: Vec<String> =
            listing.entries.iter().map(|entry| entry.id.clone()).collect();
        let stale = self
            .media
            .find_stale_drive_records(project_id, &keep)
            .await?;

        if !stale.is_empty() {
            let ids: Vec<MediaRecordID> =
                stale.iter().map(|record| record.id).collect();
            outcome.deleted = self.media.delete_many(&ids).await?;
        }

        Ok(outcome)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
