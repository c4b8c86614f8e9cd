//! Domain error shared by every gallery crate.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced row (user, application) does not exist.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Applicant input or a stored value failed a domain rule.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The acting user lacks the staff role or is deactivated.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        Self::NotFound { entity, id }
    }
}
