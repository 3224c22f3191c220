use crate::ids::{ServiceID, StudentID};

/// Link between a studio service and an enrolled student.
///
/// Unique on `(service_id, student_id)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServiceEnrollment {
    pub service_id: ServiceID,
    pub student_id: StudentID,
}
