use std::{fmt, sync::Arc};

use folio_core::application::unit_of_work::AppUnitOfWork;
use folio_core::auth::SessionAuthenticator;
use folio_core::drive::FolderListing;
use folio_core::reconcile::{EnrollmentReconciler, MediaReconciler};

use crate::infra::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub unit_of_work: Arc<AppUnitOfWork>,
    pub config: Arc<Config>,
    pub authenticator: SessionAuthenticator,
    pub media_reconciler: MediaReconciler,
    pub enrollment_reconciler: EnrollmentReconciler,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    /// Wire the reconcilers over the unit of work's ports.
    pub fn new(
        unit_of_work: Arc<AppUnitOfWork>,
        drive: Arc<dyn FolderListing>,
        config: Arc<Config>,
    ) -> Self {
        let authenticator =
            SessionAuthenticator::new(unit_of_work.sessions.clone());
        let media_reconciler =
            MediaReconciler::new(unit_of_work.media_records.clone(), drive);
        let enrollment_reconciler =
            EnrollmentReconciler::new(unit_of_work.enrollments.clone());

        Self {
            unit_of_work,
            config,
            authenticator,
            media_reconciler,
            enrollment_reconciler,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
