use gallery_core::error::CoreError;
use gallery_core::types::DbId;

/// Failure of a single staff-side transition.
///
/// Batch entry points never return these for individual items; they record
/// the failure on the application row and report the id as failed instead.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("Artist application {0} not found")]
    NotFound(DbId),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl WorkflowError {
    /// Whether the underlying cause is a storage-level unique violation.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::Database(err) => gallery_db::is_unique_violation(err, None),
            _ => false,
        }
    }
}

/// Failure to submit a new application.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] CoreError),

    #[error("User {0} is already an approved artist")]
    AlreadyArtist(DbId),

    #[error("User {0} already has an artist application in progress")]
    Duplicate(DbId),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
