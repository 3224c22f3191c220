//! Core data model definitions shared across Folio crates.

pub mod drive;
pub mod enrollment;
pub mod ids;
pub mod media;
pub mod project;

pub use drive::{DriveEntry, DriveFolderId};
pub use enrollment::ServiceEnrollment;
pub use ids::{MediaRecordID, ProjectID, ServiceID, StudentID, UserID};
pub use media::{MediaFields, MediaRecord};
pub use project::Project;
