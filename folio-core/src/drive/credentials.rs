use serde::Deserialize;
use std::{fmt, path::Path};

use super::DriveError;

/// The subset of a Google service-account JSON key used for token minting.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub token_uri: Option<String>,
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

impl ServiceAccountKey {
    /// Build a key from an email and a PEM private key.
    ///
    /// Keys passed through environment variables usually carry literal
    /// `\n` sequences instead of newlines; those are expanded here.
    pub fn new(
        client_email: impl Into<String>,
        private_key: impl AsRef<str>,
    ) -> Result<Self, DriveError> {
        let key = Self {
            client_email: client_email.into(),
            private_key: private_key.as_ref().replace("\\n", "\n"),
            token_uri: None,
        };
        key.validate()
    }

    pub fn from_json(json: &str) -> Result<Self, DriveError> {
        let mut key: Self = serde_json::from_str(json)
            .map_err(|e| DriveError::InvalidKey(e.to_string()))?;
        key.private_key = key.private_key.replace("\\n", "\n");
        key.validate()
    }

    pub fn from_file(path: &Path) -> Result<Self, DriveError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            DriveError::InvalidKey(format!("{}: {e}", path.display()))
        })?;
        Self::from_json(&contents)
    }

    fn validate(self) -> Result<Self, DriveError> {
        if self.client_email.trim().is_empty() {
            return Err(DriveError::InvalidKey(
                "client_email is empty".to_string(),
            ));
        }
        if !self.private_key.contains("PRIVATE KEY") {
            return Err(DriveError::InvalidKey(
                "private_key is not a PEM encoded key".to_string(),
            ));
        }
        Ok(self)
    }
}
