//! Outcome buckets returned by the batch entry points.
//!
//! Bucket order carries no meaning; ids are sorted before the result is
//! handed back so summaries print deterministically.

use gallery_core::types::DbId;
use serde::Serialize;

/// Outcome of a batch approval.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApproveResult {
    /// A profile was created for these applications.
    pub approved: Vec<DbId>,
    /// Not actionable, or the applicant already had a profile.
    pub skipped: Vec<DbId>,
    /// The transition failed; the row is now in `ERROR`.
    pub failed: Vec<DbId>,
}

impl ApproveResult {
    /// Number of applications that landed in any bucket.
    pub fn total(&self) -> usize {
        self.approved.len() + self.skipped.len() + self.failed.len()
    }

    /// One-line summary for staff, e.g. `"2 approved, 1 skipped, 0 failed"`.
    pub fn summary(&self) -> String {
        format!(
            "{} approved, {} skipped, {} failed",
            self.approved.len(),
            self.skipped.len(),
            self.failed.len()
        )
    }

    pub(crate) fn sorted(mut self) -> Self {
        self.approved.sort_unstable();
        self.skipped.sort_unstable();
        self.failed.sort_unstable();
        self
    }
}

/// Outcome of a batch rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RejectResult {
    pub rejected: Vec<DbId>,
    pub skipped: Vec<DbId>,
    pub failed: Vec<DbId>,
}

impl RejectResult {
    pub fn total(&self) -> usize {
        self.rejected.len() + self.skipped.len() + self.failed.len()
    }

    /// One-line summary for staff, e.g. `"3 rejected, 0 skipped, 0 failed"`.
    pub fn summary(&self) -> String {
        format!(
            "{} rejected, {} skipped, {} failed",
            self.rejected.len(),
            self.skipped.len(),
            self.failed.len()
        )
    }

    pub(crate) fn sorted(mut self) -> Self {
        self.rejected.sort_unstable();
        self.skipped.sort_unstable();
        self.failed.sort_unstable();
        self
    }
}
