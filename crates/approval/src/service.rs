//! Staff-side transitions for artist applications.
//!
//! Every single-application transition runs in its own transaction and holds
//! the application's row lock (`SELECT ... FOR UPDATE`) until it commits, so
//! two staff members acting on the same id serialise and the second one sees
//! the already-advanced status. Batches lock one row at a time and never hold
//! a lock across items.

use std::collections::HashSet;

use gallery_core::artist_application::{ProcessOutcome, PROFILE_EXISTS_MESSAGE};
use gallery_core::types::DbId;
use gallery_db::models::artist_profile::CreateArtistProfile;
use gallery_db::repositories::{ArtistApplicationRepo, ArtistProfileRepo};
use gallery_db::DbPool;
use sqlx::Connection;

use crate::error::WorkflowError;
use crate::result::{ApproveResult, RejectResult};

// ---------------------------------------------------------------------------
// Single-application transitions
// ---------------------------------------------------------------------------

/// Approve one application and create the applicant's artist profile.
///
/// Returns [`ProcessOutcome::Skipped`] without touching the row when the
/// application is not `PENDING` or `ERROR`. When the applicant already has a
/// profile the application is still marked `APPROVED`, with
/// [`PROFILE_EXISTS_MESSAGE`] recorded, and the outcome is `Skipped`.
///
/// Any other failure rolls the transaction back and is returned to the caller.
pub async fn process_single_application(
    pool: &DbPool,
    application_id: DbId,
    admin_id: DbId,
) -> Result<ProcessOutcome, WorkflowError> {
    let mut tx = pool.begin().await?;

    let application = ArtistApplicationRepo::find_for_update(&mut tx, application_id)
        .await?
        .ok_or(WorkflowError::NotFound(application_id))?;

    let status = application.status()?;
    if !status.is_actionable() {
        tx.rollback().await?;
        tracing::warn!(
            application_id,
            admin_id,
            status = %status,
            outcome = %ProcessOutcome::Skipped,
            "Application not actionable, skipping approval"
        );
        return Ok(ProcessOutcome::Skipped);
    }

    ArtistApplicationRepo::mark_processing(&mut tx, application_id, admin_id).await?;

    // `ON CONFLICT` only covers the user_id constraint. Any other unique
    // violation on the insert is rolled back to the savepoint and treated as
    // an existing profile.
    let seed = CreateArtistProfile::approved_from(&application);
    let created = {
        let mut savepoint = tx.begin().await?;
        match ArtistProfileRepo::create_if_absent(&mut savepoint, &seed).await {
            Ok(profile) => {
                savepoint.commit().await?;
                profile.is_some()
            }
            Err(err) if gallery_db::is_unique_violation(&err, None) => {
                savepoint.rollback().await?;
                false
            }
            Err(err) => return Err(err.into()),
        }
    };

    if created {
        ArtistApplicationRepo::mark_approved(&mut tx, application_id, None).await?;
        tx.commit().await?;
        tracing::info!(
            application_id,
            admin_id,
            applicant_id = application.applicant_id,
            outcome = %ProcessOutcome::Approved,
            "Artist application approved"
        );
        Ok(ProcessOutcome::Approved)
    } else {
        ArtistApplicationRepo::mark_approved(&mut tx, application_id, Some(PROFILE_EXISTS_MESSAGE))
            .await?;
        tx.commit().await?;
        tracing::warn!(
            application_id,
            admin_id,
            applicant_id = application.applicant_id,
            outcome = %ProcessOutcome::Skipped,
            "Artist profile already exists, application resolved without a new profile"
        );
        Ok(ProcessOutcome::Skipped)
    }
}

/// Reject one application.
///
/// Only `PENDING` and `ERROR` applications are rejectable; anything else is
/// [`ProcessOutcome::Skipped`] with no mutation. Rejection frees the
/// applicant to submit a new application.
pub async fn process_single_rejection(
    pool: &DbPool,
    application_id: DbId,
    admin_id: DbId,
) -> Result<ProcessOutcome, WorkflowError> {
    let mut tx = pool.begin().await?;

    let application = ArtistApplicationRepo::find_for_update(&mut tx, application_id)
        .await?
        .ok_or(WorkflowError::NotFound(application_id))?;

    let status = application.status()?;
    if !status.is_actionable() {
        tx.rollback().await?;
        tracing::warn!(
            application_id,
            admin_id,
            status = %status,
            outcome = %ProcessOutcome::Skipped,
            "Application not actionable, skipping rejection"
        );
        return Ok(ProcessOutcome::Skipped);
    }

    ArtistApplicationRepo::mark_rejected(&mut tx, application_id, admin_id).await?;
    tx.commit().await?;

    tracing::info!(
        application_id,
        admin_id,
        applicant_id = application.applicant_id,
        outcome = %ProcessOutcome::Rejected,
        "Artist application rejected"
    );
    Ok(ProcessOutcome::Rejected)
}

// ---------------------------------------------------------------------------
// Batch entry points
// ---------------------------------------------------------------------------

/// Approve every application in `ids`, isolating per-item failures.
///
/// Duplicate ids are processed once. Ids with no matching row are left out of
/// every bucket. A failing item is forced into `ERROR` with the failure text
/// and reported in `failed`; the remaining items still run.
///
/// Only the initial id lookup can fail the whole call.
pub async fn process_multiple_approve(
    pool: &DbPool,
    ids: &[DbId],
    admin_id: DbId,
) -> Result<ApproveResult, WorkflowError> {
    let targets = resolve_ids(pool, ids).await?;
    let mut result = ApproveResult::default();

    for id in targets {
        match process_single_application(pool, id, admin_id).await {
            Ok(ProcessOutcome::Approved) => result.approved.push(id),
            Ok(_) => result.skipped.push(id),
            Err(err) => {
                record_failure(pool, id, &err).await;
                result.failed.push(id);
            }
        }
    }

    let result = result.sorted();
    tracing::info!(admin_id, summary = %result.summary(), "Batch approval finished");
    Ok(result)
}

/// Reject every application in `ids`, isolating per-item failures.
///
/// Follows the same resolution and failure rules as [`process_multiple_approve`].
pub async fn process_multiple_reject(
    pool: &DbPool,
    ids: &[DbId],
    admin_id: DbId,
) -> Result<RejectResult, WorkflowError> {
    let targets = resolve_ids(pool, ids).await?;
    let mut result = RejectResult::default();

    for id in targets {
        match process_single_rejection(pool, id, admin_id).await {
            Ok(ProcessOutcome::Rejected) => result.rejected.push(id),
            Ok(_) => result.skipped.push(id),
            Err(err) => {
                record_failure(pool, id, &err).await;
                result.failed.push(id);
            }
        }
    }

    let result = result.sorted();
    tracing::info!(admin_id, summary = %result.summary(), "Batch rejection finished");
    Ok(result)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Collapse duplicates and drop ids that do not exist, logging the dropped ones.
async fn resolve_ids(pool: &DbPool, ids: &[DbId]) -> Result<Vec<DbId>, WorkflowError> {
    let requested: HashSet<DbId> = ids.iter().copied().collect();
    let unique: Vec<DbId> = requested.iter().copied().collect();
    let found = ArtistApplicationRepo::existing_ids(pool, &unique).await?;

    if found.len() < requested.len() {
        let found_set: HashSet<DbId> = found.iter().copied().collect();
        let mut missing: Vec<DbId> = requested.difference(&found_set).copied().collect();
        missing.sort_unstable();
        tracing::warn!(?missing, "Ignoring unknown artist application ids");
    }

    Ok(found)
}

/// Text stored in `last_error_message` for a failed transition.
fn failure_message(err: &WorkflowError) -> String {
    if err.is_unique_violation() {
        format!("integrity violation: {err}")
    } else {
        format!("error: {err}")
    }
}

/// Force a failed application into `ERROR`.
///
/// The item is reported as failed whether or not this write succeeds, so a
/// second failure is only logged.
async fn record_failure(pool: &DbPool, application_id: DbId, err: &WorkflowError) {
    let message = failure_message(err);
    tracing::error!(application_id, error = %err, "Artist application transition failed");

    match ArtistApplicationRepo::force_error(pool, application_id, &message).await {
        Ok(true) => {}
        Ok(false) => tracing::warn!(
            application_id,
            "Artist application already approved or gone, ERROR status not recorded"
        ),
        Err(write_err) => tracing::error!(
            application_id,
            error = %write_err,
            "Failed to record ERROR status on artist application"
        ),
    }
}
