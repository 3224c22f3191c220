//! In-memory adapters for the repository ports and the Drive listing.
//!
//! They keep the uniqueness rules of the Postgres schema so reconciler and
//! HTTP tests observe the same conflicts a database would report.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use folio_model::{
    DriveEntry, DriveFolderId, MediaFields, MediaRecord, MediaRecordID, Project,
    ProjectID, ServiceEnrollment, ServiceID, StudentID, UserID,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::auth::hash_session_token;
use crate::database::ports::{
    enrollments::EnrollmentsRepository, media_records::MediaRecordsRepository,
    projects::ProjectsRepository, sessions::SessionsRepository,
};
use crate::drive::{DriveError, FolderListing, FolderListingPage};
use crate::error::{FolioError, Result};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn gallery_order(records: &mut [MediaRecord]) {
    records.sort_by(|a, b| {
        (!a.is_drive_backed(), a.sort_order, &a.file_name).cmp(&(
            !b.is_drive_backed(),
            b.sort_order,
            &b.file_name,
        ))
    });
}

#[derive(Debug, Default)]
pub struct InMemoryMediaRecords {
    records: Mutex<Vec<MediaRecord>>,
    inserts: AtomicUsize,
    updates: AtomicUsize,
    deletes: AtomicUsize,
    inserts_allowed: Mutex<Option<usize>>,
}

impl InMemoryMediaRecords {
    pub fn seed_drive_record(
        &self,
        project_id: ProjectID,
        drive_file_id: &str,
        file_name: &str,
        sort_order: i32,
    ) -> MediaRecord {
        self.seed(project_id, Some(drive_file_id.to_string()), file_name, sort_order)
    }

    /// A hand-added record with no Drive counterpart.
    pub fn seed_manual_record(
        &self,
        project_id: ProjectID,
        file_name: &str,
        sort_order: i32,
    ) -> MediaRecord {
        self.seed(project_id, None, file_name, sort_order)
    }

    fn seed(
        &self,
        project_id: ProjectID,
        drive_file_id: Option<String>,
        file_name: &str,
        sort_order: i32,
    ) -> MediaRecord {
        let record = MediaRecord {
            id: MediaRecordID::new(),
            project_id,
            drive_file_id,
            file_name: file_name.to_string(),
            mime_type: "application/octet-stream".to_string(),
            thumbnail_url: None,
            web_view_url: None,
            sort_order,
        };
        lock(&self.records).push(record.clone());
        record
    }

    /// Snapshot of a project's records in gallery order.
    pub fn records_for(&self, project_id: ProjectID) -> Vec<MediaRecord> {
        let mut records: Vec<MediaRecord> = lock(&self.records)
            .iter()
            .filter(|record| record.project_id == project_id)
            .cloned()
            .collect();
        gallery_order(&mut records);
        records
    }

    /// Let `allowed` more inserts succeed, then fail every insert.
    pub fn fail_inserts_after(&self, allowed: usize) {
        *lock(&self.inserts_allowed) = Some(allowed);
    }

    pub fn clear_failures(&self) {
        *lock(&self.inserts_allowed) = None;
    }

    pub fn insert_count(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    /// Inserted, updated and deleted rows so far.
    pub fn write_count(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
            + self.updates.load(Ordering::SeqCst)
            + self.deletes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaRecordsRepository for InMemoryMediaRecords {
    async fn find_by_drive_file(
        &self,
        project_id: ProjectID,
        drive_file_id: &str,
    ) -> Result<Option<MediaRecord>> {
        Ok(lock(&self.records)
            .iter()
            .find(|record| {
                record.project_id == project_id
                    && record.drive_file_id.as_deref() == Some(drive_file_id)
            })
            .cloned())
    }

    async fn insert_drive_record(
        &self,
        project_id: ProjectID,
        drive_file_id: &str,
        fields: &MediaFields,
    ) -> Result<MediaRecord> {
        {
            let mut allowed = lock(&self.inserts_allowed);
            match allowed.as_mut() {
                Some(0) => {
                    return Err(FolioError::Database(
                        "Failed to insert media record: injected failure"
                            .into(),
                    ));
                }
                Some(remaining) => *remaining -= 1,
                None => {}
            }
        }

        let mut records = lock(&self.records);
        if records.iter().any(|record| {
            record.project_id == project_id
                && record.drive_file_id.as_deref() == Some(drive_file_id)
        }) {
            return Err(FolioError::Database(format!(
                "duplicate media record for drive file {drive_file_id}"
            )));
        }

        let record = MediaRecord {
            id: MediaRecordID::new(),
            project_id,
            drive_file_id: Some(drive_file_id.to_string()),
            file_name: fields.file_name.clone(),
            mime_type: fields.mime_type.clone(),
            thumbnail_url: fields.thumbnail_url.clone(),
            web_view_url: fields.web_view_url.clone(),
            sort_order: fields.sort_order,
        };
        records.push(record.clone());
        self.inserts.fetch_add(1, Ordering::SeqCst);
        Ok(record)
    }

    async fn update_fields(
        &self,
        id: MediaRecordID,
        fields: &MediaFields,
    ) -> Result<()> {
        let mut records = lock(&self.records);
        let record = records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| FolioError::NotFound(format!("media record {id}")))?;

        record.file_name = fields.file_name.clone();
        record.mime_type = fields.mime_type.clone();
        record.thumbnail_url = fields.thumbnail_url.clone();
        record.web_view_url = fields.web_view_url.clone();
        record.sort_order = fields.sort_order;
        self.updates.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn find_stale_drive_records(
        &self,
        project_id: ProjectID,
        keep: &[String],
    ) -> Result<Vec<MediaRecord>> {
        Ok(lock(&self.records)
            .iter()
            .filter(|record| record.project_id == project_id)
            .filter(|record| {
                record
                    .drive_file_id
                    .as_ref()
                    .is_some_and(|id| !keep.contains(id))
            })
            .cloned()
            .collect())
    }

    async fn delete_many(&self, ids: &[MediaRecordID]) -> Result<u64> {
        let mut records = lock(&self.records);
        let before = records.len();
        records.retain(|record| !ids.contains(&record.id));
        let removed = before - records.len();
        self.deletes.fetch_add(removed, Ordering::SeqCst);
        Ok(removed as u64)
    }

    async fn list_for_project(
        &self,
        project_id: ProjectID,
    ) -> Result<Vec<MediaRecord>> {
        Ok(self.records_for(project_id))
    }
}

#[derive(Debug, Default)]
pub struct InMemoryProjects {
    projects: Mutex<HashMap<ProjectID, Project>>,
}

impl InMemoryProjects {
    pub fn insert(&self, project: Project) {
        lock(&self.projects).insert(project.id, project);
    }
}

#[async_trait]
impl ProjectsRepository for InMemoryProjects {
    async fn get_project(&self, id: ProjectID) -> Result<Option<Project>> {
        Ok(lock(&self.projects).get(&id).cloned())
    }
}

#[derive(Debug, Default)]
pub struct InMemorySessions {
    sessions: Mutex<HashMap<String, (UserID, DateTime<Utc>)>>,
    failure: Mutex<Option<String>>,
}

impl InMemorySessions {
    /// Store a session for the raw bearer `token`.
    pub fn insert(&self, token: &str, user_id: UserID, expires_at: DateTime<Utc>) {
        lock(&self.sessions)
            .insert(hash_session_token(token), (user_id, expires_at));
    }

    /// Make every following lookup fail with a storage error.
    pub fn fail_with(&self, message: impl Into<String>) {
        *lock(&self.failure) = Some(message.into());
    }
}

#[async_trait]
impl SessionsRepository for InMemorySessions {
    async fn find_active_user(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<UserID>> {
        if let Some(message) = lock(&self.failure).clone() {
            return Err(FolioError::Database(message));
        }
        Ok(lock(&self.sessions)
            .get(token_hash)
            .filter(|(_, expires_at)| *expires_at > now)
            .map(|(user_id, _)| *user_id))
    }
}

#[derive(Debug, Default)]
pub struct InMemoryEnrollments {
    links: Mutex<Vec<ServiceEnrollment>>,
}

impl InMemoryEnrollments {
    pub fn seed(&self, service_id: ServiceID, student_id: StudentID) {
        let link = ServiceEnrollment {
            service_id,
            student_id,
        };
        let mut links = lock(&self.links);
        if !links.contains(&link) {
            links.push(link);
        }
    }
}

#[async_trait]
impl EnrollmentsRepository for InMemoryEnrollments {
    async fn services_for_student(
        &self,
        student_id: StudentID,
    ) -> Result<Vec<ServiceID>> {
        Ok(lock(&self.links)
            .iter()
            .filter(|link| link.student_id == student_id)
            .map(|link| link.service_id)
            .collect())
    }

    async fn link(
        &self,
        service_id: ServiceID,
        student_id: StudentID,
    ) -> Result<bool> {
        let link = ServiceEnrollment {
            service_id,
            student_id,
        };
        let mut links = lock(&self.links);
        if links.contains(&link) {
            return Ok(false);
        }
        links.push(link);
        Ok(true)
    }

    async fn unlink_except(
        &self,
        student_id: StudentID,
        keep: &[ServiceID],
    ) -> Result<u64> {
        let mut links = lock(&self.links);
        let before = links.len();
        links.retain(|link| {
            link.student_id != student_id || keep.contains(&link.service_id)
        });
        Ok((before - links.len()) as u64)
    }
}

/// A [`FolderListing`] returning whatever entries it was last given,
/// regardless of the folder asked for.
#[derive(Debug)]
pub struct ScriptedFolderListing {
    entries: Mutex<Vec<DriveEntry>>,
    truncated: AtomicBool,
    configured: AtomicBool,
    failure: Mutex<Option<String>>,
    calls: AtomicUsize,
}

impl Default for ScriptedFolderListing {
    fn default() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            truncated: AtomicBool::new(false),
            configured: AtomicBool::new(true),
            failure: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }
}

impl ScriptedFolderListing {
    pub fn with_entries(entries: Vec<DriveEntry>) -> Self {
        let listing = Self::default();
        listing.set_entries(entries);
        listing
    }

    /// A listing that reports missing credentials.
    pub fn unconfigured() -> Self {
        let listing = Self::default();
        listing.configured.store(false, Ordering::SeqCst);
        listing
    }

    pub fn set_entries(&self, entries: Vec<DriveEntry>) {
        *lock(&self.entries) = entries;
    }

    pub fn set_truncated(&self, truncated: bool) {
        self.truncated.store(truncated, Ordering::SeqCst);
    }

    /// Make every following listing fail with a Drive API error.
    pub fn fail_with(&self, message: impl Into<String>) {
        *lock(&self.failure) = Some(message.into());
    }

    /// Number of listing requests received.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FolderListing for ScriptedFolderListing {
    fn is_configured(&self) -> bool {
        self.configured.load(Ordering::SeqCst)
    }

    async fn list_folder(
        &self,
        _folder: &DriveFolderId,
    ) -> std::result::Result<FolderListingPage, DriveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = lock(&self.failure).clone() {
            return Err(DriveError::Api {
                status: 500,
                message,
            });
        }
        Ok(FolderListingPage {
            entries: lock(&self.entries).clone(),
            truncated: self.truncated.load(Ordering::SeqCst),
        })
    }
}
