use gallery_approval::{SubmitError, WorkflowError};
use gallery_core::error::CoreError;

/// Error type for admin commands.
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    /// A domain-level error from `gallery_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error(transparent)]
    Submit(#[from] SubmitError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// Missing or malformed configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed command input.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for command return values.
pub type AdminResult<T> = Result<T, AdminError>;
