//! Artist application model and DTOs.

use chrono::NaiveDate;
use gallery_core::artist_application::ApplicationStatus;
use gallery_core::error::CoreError;
use gallery_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `artist_applications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArtistApplication {
    pub id: DbId,
    pub applicant_id: DbId,
    pub name: String,
    pub gender: String,
    pub birth_date: NaiveDate,
    pub email: String,
    pub phone: String,
    pub status: String,
    pub submitted_at: Timestamp,
    pub processed_at: Option<Timestamp>,
    pub processed_by: Option<DbId>,
    /// Empty unless the last transition failed or was resolved with a note.
    pub last_error_message: String,
}

impl ArtistApplication {
    /// Parse the stored status string.
    pub fn status(&self) -> Result<ApplicationStatus, CoreError> {
        ApplicationStatus::from_str(&self.status)
    }
}

/// DTO for submitting a new application. Status always starts as `PENDING`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateArtistApplication {
    pub applicant_id: DbId,
    pub name: String,
    pub gender: String,
    pub birth_date: NaiveDate,
    pub email: String,
    pub phone: String,
}
