//! Guarded enrollment removal.

use std::sync::Arc;

use tracing::{info, warn};

use super::error::EnrollmentError;
use super::store::EnrollmentStore;
use super::types::EnrollmentKey;

/// Removes enrollments, refusing to touch passed ones.
pub struct EnrollmentDeletionGuard<S> {
    store: Arc<S>,
}

impl<S: EnrollmentStore> EnrollmentDeletionGuard<S> {
    /// Create a new deletion guard.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Delete an enrollment that is ungraded or carries a failing grade.
    ///
    /// The lookup and the removal are separate store calls; a grade entered
    /// between them is not re-checked.
    ///
    /// # Errors
    ///
    /// Returns `PassedEnrollmentLocked` for a passed enrollment (the record
    /// is left intact), `EnrollmentNotFound` if nothing was removed, and
    /// `Store` if the store fails.
    pub fn delete_enrollment(&self, key: &EnrollmentKey) -> Result<(), EnrollmentError> {
        key.validate()?;

        if let Some(existing) = self.store.find_by_key(key)?
            && existing.is_passed()
        {
            warn!(enrollment = %key, "Refusing to delete passed enrollment");
            return Err(EnrollmentError::PassedEnrollmentLocked(key.clone()));
        }

        if !self.store.delete(key)? {
            return Err(EnrollmentError::EnrollmentNotFound(key.clone()));
        }

        info!(enrollment = %key, "Enrollment deleted");
        Ok(())
    }
}
