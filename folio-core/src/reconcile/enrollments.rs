use folio_model::{ServiceID, StudentID};
use std::{collections::HashSet, fmt, sync::Arc};
use tracing::info;

use super::KeyedLocks;
use crate::Result;
use crate::database::ports::enrollments::EnrollmentsRepository;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrollmentOutcome {
    /// Links held by the student after the sync.
    pub linked: usize,
    pub added: usize,
    pub removed: u64,
}

/// Makes a student's service links equal a desired set.
#[derive(Clone)]
pub struct EnrollmentReconciler {
    enrollments: Arc<dyn EnrollmentsRepository>,
    locks: KeyedLocks<StudentID>,
}

impl fmt::Debug for EnrollmentReconciler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnrollmentReconciler")
            .field("locks", &self.locks)
            .finish_non_exhaustive()
    }
}

impl EnrollmentReconciler {
    pub fn new(enrollments: Arc<dyn EnrollmentsRepository>) -> Self {
        Self {
            enrollments,
            locks: KeyedLocks::new(),
        }
    }

    pub async fn sync_student_services(
        &self,
        student: StudentID,
        desired: &[ServiceID],
    ) -> Result<EnrollmentOutcome> {
        let _guard = self.locks.acquire(student).await;

        let mut seen = HashSet::with_capacity(desired.len());
        let desired: Vec<ServiceID> = desired
            .iter()
            .copied()
            .filter(|service| seen.insert(*service))
            .collect();

        let mut added = 0;
        for service in &desired {
            if self.enrollments.link(*service, student).await? {
                added += 1;
            }
        }

        let removed = self.enrollments.unlink_except(student, &desired).await?;

        info!(
            student_id = %student,
            linked = desired.len(),
            added,
            removed,
            "synced student services"
        );

        Ok(EnrollmentOutcome {
            linked: desired.len(),
            added,
            removed,
        })
    }
}
