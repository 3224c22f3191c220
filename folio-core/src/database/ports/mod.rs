//! Repository ports (interfaces) grouped by bounded context.
//! Implementations live in the Postgres adapter under
//! `database::infrastructure::postgres` and, for tests, in `crate::testing`.

pub mod enrollments;
pub mod media_records;
pub mod projects;
pub mod sessions;
