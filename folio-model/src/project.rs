use crate::ids::ProjectID;

/// A showcased work item inside a student's portfolio.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Project {
    pub id: ProjectID,
    pub title: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub drive_folder_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub sort_order: i32,
}
