//! Approved artist profile model and DTOs.

use chrono::NaiveDate;
use gallery_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::artist_application::ArtistApplication;

/// A row from the `artist_profiles` table. One per user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArtistProfile {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub gender: String,
    pub birth_date: NaiveDate,
    pub email: String,
    pub phone: String,
    pub is_approved: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a profile.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateArtistProfile {
    pub user_id: DbId,
    pub name: String,
    pub gender: String,
    pub birth_date: NaiveDate,
    pub email: String,
    pub phone: String,
    pub is_approved: bool,
}

impl CreateArtistProfile {
    /// Seed an approved profile from the data the applicant submitted.
    pub fn approved_from(application: &ArtistApplication) -> Self {
        Self {
            user_id: application.applicant_id,
            name: application.name.clone(),
            gender: application.gender.clone(),
            birth_date: application.birth_date,
            email: application.email.clone(),
            phone: application.phone.clone(),
            is_approved: true,
        }
    }
}
