use crate::drive::DriveEntry;
use crate::ids::{MediaRecordID, ProjectID};

/// One file in a project's media gallery.
///
/// Records with a `drive_file_id` mirror a file in the project's Drive
/// folder and are owned by the media reconciler. Records without one were
/// added by hand and are never touched by a sync.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaRecord {
    pub id: MediaRecordID,
    pub project_id: ProjectID,
    pub drive_file_id: Option<String>,
    pub file_name: String,
    pub mime_type: String,
    pub thumbnail_url: Option<String>,
    pub web_view_url: Option<String>,
    pub sort_order: i32,
}

impl MediaRecord {
    pub fn is_drive_backed(&self) -> bool {
        self.drive_file_id.is_some()
    }

    /// True when the stored columns already equal `fields`.
    pub fn matches(&self, fields: &MediaFields) -> bool {
        self.file_name == fields.file_name
            && self.mime_type == fields.mime_type
            && self.thumbnail_url == fields.thumbnail_url
            && self.web_view_url == fields.web_view_url
            && self.sort_order == fields.sort_order
    }
}

/// Columns written by a sync for a single Drive entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFields {
    pub file_name: String,
    pub mime_type: String,
    pub thumbnail_url: Option<String>,
    pub web_view_url: Option<String>,
    pub sort_order: i32,
}

impl MediaFields {
    pub fn from_entry(entry: &DriveEntry, sort_order: i32) -> Self {
        Self {
            file_name: entry.name.clone(),
            mime_type: entry.mime_type.clone(),
            thumbnail_url: entry.thumbnail_link.clone(),
            web_view_url: entry.web_view_link.clone(),
            sort_order,
        }
    }
}
