//! Convergence routines.
//!
//! Both reconcilers follow the same shape: write every desired row keyed by
//! its natural key, and only then delete the rows the desired set no longer
//! names. A crash between the phases leaves extra rows behind, never missing
//! ones, and a rerun converges.

mod enrollments;
mod locks;
mod media;

pub use enrollments::{EnrollmentOutcome, EnrollmentReconciler};
pub use locks::{KeyedLockGuard, KeyedLocks, ProjectLocks};
pub use media::{MediaReconciler, ReconcileOutcome};

use thiserror::Error;

use crate::drive::DriveError;
use crate::error::FolioError;

/// Failure of a single reconciliation call. None are retried.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Missing required field: {0}")]
    MissingInput(String),

    #[error("Invalid Google Drive folder URL")]
    InvalidFolderUrl,

    #[error("Google Drive integration is not configured")]
    IntegrationNotConfigured,

    #[error("Google Drive request failed: {0}")]
    ExternalService(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<DriveError> for ReconcileError {
    fn from(err: DriveError) -> Self {
        match err {
            DriveError::NotConfigured => ReconcileError::IntegrationNotConfigured,
            other => ReconcileError::ExternalService(other.to_string()),
        }
    }
}

impl From<FolioError> for ReconcileError {
    fn from(err: FolioError) -> Self {
        ReconcileError::Storage(err.to_string())
    }
}
