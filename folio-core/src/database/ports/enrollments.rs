use async_trait::async_trait;
use folio_model::{ServiceID, StudentID};

use crate::Result;

#[async_trait]
pub trait EnrollmentsRepository: Send + Sync {
    async fn services_for_student(
        &self,
        student_id: StudentID,
    ) -> Result<Vec<ServiceID>>;

    /// Returns `true` when a new link was created.
    async fn link(
        &self,
        service_id: ServiceID,
        student_id: StudentID,
    ) -> Result<bool>;

    /// Remove every link of the student whose service is not in `keep`.
    async fn unlink_except(
        &self,
        student_id: StudentID,
        keep: &[ServiceID],
    ) -> Result<u64>;
}
