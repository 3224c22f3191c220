//! Google Drive folder listing.
//!
//! The reconciler only depends on [`FolderListing`]; [`GoogleDriveClient`]
//! is the production implementation talking to the Drive v3 REST API with a
//! service-account token scoped to `drive.metadata.readonly`.

mod client;
mod credentials;
mod token;

pub use client::GoogleDriveClient;
pub use credentials::ServiceAccountKey;
pub use token::ServiceAccountTokenSource;

use async_trait::async_trait;
use folio_model::{DriveEntry, DriveFolderId};
use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;

pub const DRIVE_METADATA_SCOPE: &str =
    "https://www.googleapis.com/auth/drive.metadata.readonly";
pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/drive/v3/";
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Maximum entries requested from `files.list`. Only one page is fetched.
pub const LISTING_PAGE_SIZE: u32 = 100;

static FOLDER_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/folders/([A-Za-z0-9_-]+)").expect("folder url pattern")
});

/// Extract the folder id from a Drive share URL
/// (`https://drive.google.com/drive/folders/<id>?usp=sharing`).
pub fn folder_id_from_url(url: &str) -> Option<DriveFolderId> {
    FOLDER_URL
        .captures(url)
        .and_then(|captures| captures.get(1))
        .and_then(|id| DriveFolderId::new(id.as_str()))
}

#[derive(Debug, thiserror::Error)]
pub enum DriveError {
    #[error("Google Drive credentials are not configured")]
    NotConfigured,

    #[error("Invalid service account key: {0}")]
    InvalidKey(String),

    #[error("Token exchange failed: {0}")]
    Auth(String),

    #[error("Drive API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Drive request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected Drive response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for DriveError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DriveError::Timeout
        } else if err.is_decode() {
            DriveError::Parse(err.to_string())
        } else {
            DriveError::Network(err.to_string())
        }
    }
}

/// One `files.list` page for a folder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderListingPage {
    /// Non-trashed children in name order.
    pub entries: Vec<DriveEntry>,
    /// Drive reported more entries beyond [`LISTING_PAGE_SIZE`].
    pub truncated: bool,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FolderListing: Send + Sync {
    /// Whether credentials are present. Checked before any request is made.
    fn is_configured(&self) -> bool;

    async fn list_folder(
        &self,
        folder: &DriveFolderId,
    ) -> Result<FolderListingPage, DriveError>;
}

/// Connection settings for [`GoogleDriveClient`].
#[derive(Debug, Clone)]
pub struct DriveSettings {
    pub credentials: Option<ServiceAccountKey>,
    pub api_base: String,
    pub token_uri: String,
    pub request_timeout: Duration,
}

impl Default for DriveSettings {
    fn default() -> Self {
        Self {
            credentials: None,
            api_base: DEFAULT_API_BASE.to_string(),
            token_uri: DEFAULT_TOKEN_URI.to_string(),
            request_timeout: Duration::from_secs(20),
        }
    }
}
