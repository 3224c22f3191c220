use std::any::type_name_of_val;
use std::fmt;
use std::sync::Arc;

use crate::database::PostgresDatabase;
use crate::database::ports::{
    enrollments::EnrollmentsRepository, media_records::MediaRecordsRepository,
    projects::ProjectsRepository, sessions::SessionsRepository,
};

/// Aggregates the repository ports used by handlers and reconcilers.
#[derive(Clone)]
pub struct AppUnitOfWork {
    pub media_records: Arc<dyn MediaRecordsRepository>,
    pub projects: Arc<dyn ProjectsRepository>,
    pub sessions: Arc<dyn SessionsRepository>,
    pub enrollments: Arc<dyn EnrollmentsRepository>,
}

impl fmt::Debug for AppUnitOfWork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppUnitOfWork")
            .field(
                "media_records",
                &type_name_of_val(self.media_records.as_ref()),
            )
            .field("projects", &type_name_of_val(self.projects.as_ref()))
            .field("sessions", &type_name_of_val(self.sessions.as_ref()))
            .field(
                "enrollments",
                &type_name_of_val(self.enrollments.as_ref()),
            )
            .finish()
    }
}

#[derive(Default)]
pub struct AppUnitOfWorkBuilder {
    media_records: Option<Arc<dyn MediaRecordsRepository>>,
    projects: Option<Arc<dyn ProjectsRepository>>,
    sessions: Option<Arc<dyn SessionsRepository>>,
    enrollments: Option<Arc<dyn EnrollmentsRepository>>,
}

impl fmt::Debug for AppUnitOfWorkBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppUnitOfWorkBuilder")
            .field("media_records", &self.media_records.is_some())
            .field("projects", &self.projects.is_some())
            .field("sessions", &self.sessions.is_some())
            .field("enrollments", &self.enrollments.is_some())
            .finish()
    }
}

impl AppUnitOfWorkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_media_records(
        mut self,
        repo: Arc<dyn MediaRecordsRepository>,
    ) -> Self {
        self.media_records = Some(repo);
        self
    }
    pub fn with_projects(mut self, repo: Arc<dyn ProjectsRepository>) -> Self {
        self.projects = Some(repo);
        self
    }
    pub fn with_sessions(mut self, repo: Arc<dyn SessionsRepository>) -> Self {
        self.sessions = Some(repo);
        self
    }
    pub fn with_enrollments(
        mut self,
        repo: Arc<dyn EnrollmentsRepository>,
    ) -> Self {
        self.enrollments = Some(repo);
        self
    }

    /// Populate every port with its Postgres adapter.
    pub fn with_postgres(mut self, db: &PostgresDatabase) -> Self {
        self.media_records = Some(Arc::new(db.media_records_repository()));
        self.projects = Some(Arc::new(db.projects_repository()));
        self.sessions = Some(Arc::new(db.sessions_repository()));
        self.enrollments = Some(Arc::new(db.enrollments_repository()));
        self
    }

    /// Returns a string error naming the first missing repository.
    pub fn build(self) -> Result<AppUnitOfWork, String> {
        Ok(AppUnitOfWork {
            media_records: self
                .media_records
                .ok_or_else(|| "missing MediaRecordsRepository".to_string())?,
            projects: self
                .projects
                .ok_or_else(|| "missing ProjectsRepository".to_string())?,
            sessions: self
                .sessions
                .ok_or_else(|| "missing SessionsRepository".to_string())?,
            enrollments: self
                .enrollments
                .ok_or_else(|| "missing EnrollmentsRepository".to_string())?,
        })
    }
}

impl AppUnitOfWork {
    pub fn from_postgres(db: &PostgresDatabase) -> Result<Self, String> {
        AppUnitOfWorkBuilder::new().with_postgres(db).build()
    }
}
