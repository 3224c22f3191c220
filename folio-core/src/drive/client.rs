use async_trait::async_trait;
use folio_model::{DriveEntry, DriveFolderId};
use serde::Deserialize;
use std::fmt;
use tracing::{debug, warn};
use url::Url;

use super::{
    DriveError, DriveSettings, FolderListing, FolderListingPage,
    LISTING_PAGE_SIZE, ServiceAccountTokenSource,
};

const LISTING_FIELDS: &str =
    "nextPageToken, files(id, name, mimeType, thumbnailLink, webViewLink)";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FilesListResponse {
    #[serde(default)]
    files: Vec<DriveEntry>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Drive v3 client listing folder contents with a service-account token.
pub struct GoogleDriveClient {
    http: reqwest::Client,
    files_endpoint: Url,
    tokens: Option<ServiceAccountTokenSource>,
}

impl fmt::Debug for GoogleDriveClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleDriveClient")
            .field("files_endpoint", &self.files_endpoint.as_str())
            .field("configured", &self.tokens.is_some())
            .finish()
    }
}

impl GoogleDriveClient {
    /// Build a client from settings. Missing credentials produce an
    /// unconfigured client rather than an error.
    pub fn new(settings: &DriveSettings) -> Result<Self, DriveError> {
        let http = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(|e| DriveError::Network(e.to_string()))?;

        let files_endpoint = files_endpoint(&settings.api_base)?;

        let tokens = settings
            .credentials
            .clone()
            .map(|key| {
                ServiceAccountTokenSource::new(
                    key,
                    &settings.token_uri,
                    http.clone(),
                )
            })
            .transpose()?;

        Ok(Self {
            http,
            files_endpoint,
            tokens,
        })
    }

    fn listing_query(folder: &DriveFolderId) -> String {
        format!("'{}' in parents and trashed = false", folder.as_str())
    }
}

/// `<api_base>/files`, keeping the last base segment whether or not the
/// configured base ends with a slash.
fn files_endpoint(api_base: &str) -> Result<Url, DriveError> {
    let mut base = Url::parse(api_base).map_err(|e| {
        DriveError::Parse(format!("invalid Drive API base {api_base}: {e}"))
    })?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("files").map_err(|e| {
        DriveError::Parse(format!("invalid Drive API base {api_base}: {e}"))
    })
}

#[async_trait]
impl FolderListing for GoogleDriveClient {
    fn is_configured(&self) -> bool {
        self.tokens.is_some()
    }

    async fn list_folder(
        &self,
        folder: &DriveFolderId,
    ) -> Result<FolderListingPage, DriveError> {
        let tokens = self.tokens.as_ref().ok_or(DriveError::NotConfigured)?;
        let access_token = tokens.access_token().await?;

        let query = Self::listing_query(folder);
        let page_size = LISTING_PAGE_SIZE.to_string();
        let response = self
            .http
            .get(self.files_endpoint.clone())
            .bearer_auth(access_token)
            .query(&[
                ("q", query.as_str()),
                ("fields", LISTING_FIELDS),
                ("pageSize", page_size.as_str()),
                ("orderBy", "name"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or(body);
            return Err(DriveError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let listing: FilesListResponse = response.json().await?;
        let truncated = listing.next_page_token.is_some();
        if truncated {
            warn!(
                folder = %folder,
                page_size = LISTING_PAGE_SIZE,
                "Drive folder listing truncated to first page"
            );
        }
        debug!(
            folder = %folder,
            entries = listing.files.len(),
            "listed Drive folder"
        );

        Ok(FolderListingPage {
            entries: listing.files,
            truncated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn listing_query_excludes_trashed_children() {
        let folder = DriveFolderId::new("abc123").unwrap();
        assert_eq!(
            GoogleDriveClient::listing_query(&folder),
            "'abc123' in parents and trashed = false"
        );
    }

    #[test]
    fn parses_listing_with_missing_links() {
        let body = json!({
            "files": [
                {
                    "id": "f1",
                    "name": "a.png",
                    "mimeType": "image/png",
                    "thumbnailLink": "https://thumb/f1",
                    "webViewLink": "https://view/f1"
                },
                { "id": "f2", "name": "b.pdf", "mimeType": "application/pdf" }
            ]
        });
        let parsed: FilesListResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.files.len(), 2);
        assert_eq!(
            parsed.files[0].thumbnail_link.as_deref(),
            Some("https://thumb/f1")
        );
        assert!(parsed.files[1].thumbnail_link.is_none());
        assert!(parsed.files[1].web_view_link.is_none());
        assert!(parsed.next_page_token.is_none());
    }

    #[test]
    fn empty_folder_response_has_no_files_key() {
        let parsed: FilesListResponse =
            serde_json::from_value(json!({})).unwrap();
        assert!(parsed.files.is_empty());
    }

    #[tokio::test]
    async fn unconfigured_client_refuses_to_list() {
        let client = GoogleDriveClient::new(&DriveSettings::default()).unwrap();
        assert!(!client.is_configured());
        let folder = DriveFolderId::new("abc").unwrap();
        assert!(matches!(
            client.list_folder(&folder).await,
            Err(DriveError::NotConfigured)
        ));
    }

    #[test]
    fn files_endpoint_keeps_last_segment_without_trailing_slash() {
        let settings = DriveSettings {
            api_base: "https://www.googleapis.com/drive/v3".into(),
            ..DriveSettings::default()
        };
        let client = GoogleDriveClient::new(&settings).unwrap();
        assert_eq!(
            client.files_endpoint.as_str(),
            "https://www.googleapis.com/drive/v3/files"
        );
    }

    #[test]
    fn files_endpoint_rejects_unparseable_base() {
        let settings = DriveSettings {
            api_base: "not a url".into(),
            ..DriveSettings::default()
        };
        assert!(matches!(
            GoogleDriveClient::new(&settings),
            Err(DriveError::Parse(_))
        ));
    }

    #[test]
    fn files_endpoint_joins_api_base() {
        let client = GoogleDriveClient::new(&DriveSettings::default()).unwrap();
        assert_eq!(
            client.files_endpoint.as_str(),
            "https://www.googleapis.com/drive/v3/files"
        );
    }
}
