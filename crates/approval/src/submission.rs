//! Applicant-side submission of artist applications.

use gallery_core::artist_application::validate_applicant;
use gallery_core::types::today_utc;
use gallery_db::models::artist_application::{ArtistApplication, CreateArtistApplication};
use gallery_db::repositories::artist_application_repo::UQ_ACTIVE_APPLICANT;
use gallery_db::repositories::{ArtistApplicationRepo, ArtistProfileRepo};
use gallery_db::DbPool;

use crate::error::SubmitError;

/// Submit a new `PENDING` application for `input.applicant_id`.
///
/// Refused when the applicant is already an approved artist or still has an
/// application that is not `REJECTED`. The pre-checks give a friendly error;
/// the partial unique index is what actually guarantees the rule under races.
pub async fn submit_application(
    pool: &DbPool,
    input: &CreateArtistApplication,
) -> Result<ArtistApplication, SubmitError> {
    let today = today_utc();
    validate_applicant(
        &input.name,
        &input.gender,
        input.birth_date,
        &input.email,
        &input.phone,
        today,
    )?;

    let applicant_id = input.applicant_id;

    if ArtistProfileRepo::is_approved_artist(pool, applicant_id).await? {
        return Err(SubmitError::AlreadyArtist(applicant_id));
    }

    if let Some(existing) =
        ArtistApplicationRepo::find_active_for_applicant(pool, applicant_id).await?
    {
        tracing::debug!(
            applicant_id,
            application_id = existing.id,
            status = %existing.status,
            "Applicant already has a live artist application"
        );
        return Err(SubmitError::Duplicate(applicant_id));
    }

    match ArtistApplicationRepo::create(pool, input).await {
        Ok(application) => {
            tracing::info!(
                applicant_id,
                application_id = application.id,
                "Artist application submitted"
            );
            Ok(application)
        }
        Err(err) if gallery_db::is_unique_violation(&err, Some(UQ_ACTIVE_APPLICANT)) => {
            Err(SubmitError::Duplicate(applicant_id))
        }
        Err(err) => Err(err.into()),
    }
}
