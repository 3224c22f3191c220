use async_trait::async_trait;
use chrono::{DateTime, Utc};
use folio_model::UserID;

use crate::Result;

#[async_trait]
pub trait SessionsRepository: Send + Sync {
    /// Owner of a live (unexpired, unrevoked) session with this token hash.
    async fn find_active_user(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<UserID>>;
}
