use folio_model::MediaRecord;
use serde::{Deserialize, Serialize};

/// Body of a Drive sync request.
///
/// Both fields are optional on the wire so that an absent value surfaces
/// as a `MissingInput` rejection instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveSyncRequest {
    #[serde(default)]
    pub folder_url: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveSyncResponse {
    pub success: bool,
    pub files_count: usize,
}

impl DriveSyncResponse {
    pub fn synced(files_count: usize) -> Self {
        Self {
            success: true,
            files_count,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProjectMediaResponse {
    pub media: Vec<MediaRecord>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentServicesRequest {
    #[serde(default)]
    pub service_ids: Vec<uuid::Uuid>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentServicesResponse {
    pub success: bool,
    pub linked: usize,
    pub added: usize,
    pub removed: u64,
}

/// Error body shared by every failing endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn drive_sync_request_tolerates_missing_fields() {
        let request: DriveSyncRequest =
            serde_json::from_value(json!({ "folderUrl": "x" })).unwrap();
        assert_eq!(request.folder_url.as_deref(), Some("x"));
        assert!(request.project_id.is_none());
    }

    #[test]
    fn drive_sync_response_uses_camel_case() {
        let value = serde_json::to_value(DriveSyncResponse::synced(3)).unwrap();
        assert_eq!(value, json!({ "success": true, "filesCount": 3 }));
    }
}
