//! Bearer session validation.
//!
//! Sessions are issued by the hosted identity backend; this service only
//! checks a presented token against the stored SHA-256 digest.

use chrono::Utc;
use folio_model::UserID;
use sha2::{Digest, Sha256};
use std::{fmt, sync::Arc};

use crate::Result;
use crate::database::ports::sessions::SessionsRepository;

/// The caller of an authenticated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserID,
}

/// Hex encoded SHA-256 digest stored in `auth_sessions.token_hash`.
pub fn hash_session_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

#[derive(Clone)]
pub struct SessionAuthenticator {
    sessions: Arc<dyn SessionsRepository>,
}

impl fmt::Debug for SessionAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionAuthenticator").finish_non_exhaustive()
    }
}

impl SessionAuthenticator {
    pub fn new(sessions: Arc<dyn SessionsRepository>) -> Self {
        Self { sessions }
    }

    /// Resolve a bearer token to its user, `None` for unknown or expired
    /// sessions.
    pub async fn authenticate(
        &self,
        token: &str,
    ) -> Result<Option<AuthenticatedUser>> {
        let token = token.trim();
        if token.is_empty() {
            return Ok(None);
        }

        let user = self
            .sessions
            .find_active_user(&hash_session_token(token), Utc::now())
            .await?;

        Ok(user.map(|user_id| AuthenticatedUser { user_id }))
    }
}
