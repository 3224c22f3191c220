pub mod enrollments;
pub mod health;
pub mod media_sync;
