pub mod enrollments;
pub mod media_records;
pub mod projects;
pub mod sessions;

pub use enrollments::PostgresEnrollmentsRepository;
pub use media_records::PostgresMediaRecordsRepository;
pub use projects::PostgresProjectsRepository;
pub use sessions::PostgresSessionsRepository;
