//! Google Drive facing types.
//!
//! A [`DriveFolderId`] is only ever produced by parsing a share URL of the
//! form `https://drive.google.com/drive/folders/<id>`; anything else is
//! rejected before a request leaves the process.

use std::fmt;

/// Folder identifier embedded in a Drive share URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DriveFolderId(String);

impl DriveFolderId {
    /// Wrap an already extracted identifier.
    ///
    /// Returns `None` when the value is empty or contains characters Drive
    /// never issues in ids.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let valid = !raw.is_empty()
            && raw
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        valid.then_some(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DriveFolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One non-trashed child of a Drive folder, as returned by `files.list`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DriveEntry {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub thumbnail_link: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub web_view_link: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_id_rejects_path_separators() {
        assert!(DriveFolderId::new("abc/def").is_none());
        assert!(DriveFolderId::new("").is_none());
        assert_eq!(
            DriveFolderId::new("1AbC_d-9").map(|id| id.to_string()),
            Some("1AbC_d-9".to_string())
        );
    }
}
