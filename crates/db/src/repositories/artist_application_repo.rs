//! Repository for the `artist_applications` table.
//!
//! Status writes come in two flavours: the `mark_*` transition helpers take a
//! `&mut PgConnection` so they run under the row lock acquired by
//! [`ArtistApplicationRepo::find_for_update`], while [`ArtistApplicationRepo::force_error`]
//! runs on the pool after a failed transaction has rolled back.

use gallery_core::artist_application::ApplicationStatus;
use gallery_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::artist_application::{ArtistApplication, CreateArtistApplication};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, applicant_id, name, gender, birth_date, email, phone, status, \
                       submitted_at, processed_at, processed_by, last_error_message";

/// Name of the partial unique index allowing one non-rejected application per applicant.
pub const UQ_ACTIVE_APPLICANT: &str = "uq_artist_applications_active_applicant";

/// Provides CRUD and status-transition operations for artist applications.
pub struct ArtistApplicationRepo;

impl ArtistApplicationRepo {
    /// Insert a new `PENDING` application, returning the created row.
    ///
    /// Fails with a unique violation on [`UQ_ACTIVE_APPLICANT`] when the
    /// applicant already has a non-rejected application.
    pub async fn create(
        pool: &PgPool,
        input: &CreateArtistApplication,
    ) -> Result<ArtistApplication, sqlx::Error> {
        let query = format!(
            "INSERT INTO artist_applications
                (applicant_id, name, gender, birth_date, email, phone, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ArtistApplication>(&query)
            .bind(input.applicant_id)
            .bind(input.name.trim())
            .bind(&input.gender)
            .bind(input.birth_date)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(ApplicationStatus::Pending.as_str())
            .fetch_one(pool)
            .await
    }

    /// Find an application by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ArtistApplication>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM artist_applications WHERE id = $1");
        sqlx::query_as::<_, ArtistApplication>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Load an application and hold an exclusive row lock until the
    /// surrounding transaction ends.
    ///
    /// A concurrent caller locking the same row blocks here and then observes
    /// whatever status the first transaction committed.
    pub async fn find_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<ArtistApplication>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM artist_applications WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, ArtistApplication>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Resolve a set of requested IDs to those that exist.
    ///
    /// Duplicates collapse and unknown IDs are dropped. Results follow the
    /// admin list ordering (newest first).
    pub async fn existing_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT id FROM artist_applications
             WHERE id = ANY($1)
             ORDER BY submitted_at DESC, id DESC",
        )
        .bind(ids)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Move a locked application to `PROCESSING`, stamping the acting staff
    /// member and clearing any previous error.
    pub async fn mark_processing(
        conn: &mut PgConnection,
        id: DbId,
        admin_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE artist_applications
             SET status = $2, processed_by = $3, processed_at = NOW(), last_error_message = ''
             WHERE id = $1",
        )
        .bind(id)
        .bind(ApplicationStatus::Processing.as_str())
        .bind(admin_id)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Move a locked application to `APPROVED`.
    ///
    /// `note` replaces `last_error_message` when given; otherwise the message
    /// cleared by [`Self::mark_processing`] stays empty.
    pub async fn mark_approved(
        conn: &mut PgConnection,
        id: DbId,
        note: Option<&str>,
    ) -> Result<ArtistApplication, sqlx::Error> {
        let query = format!(
            "UPDATE artist_applications
             SET status = $2, last_error_message = COALESCE($3, last_error_message)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ArtistApplication>(&query)
            .bind(id)
            .bind(ApplicationStatus::Approved.as_str())
            .bind(note)
            .fetch_one(&mut *conn)
            .await
    }

    /// Move a locked application to `REJECTED`, stamping the acting staff member.
    pub async fn mark_rejected(
        conn: &mut PgConnection,
        id: DbId,
        admin_id: DbId,
    ) -> Result<ArtistApplication, sqlx::Error> {
        let query = format!(
            "UPDATE artist_applications
             SET status = $2, processed_by = $3, processed_at = NOW(), last_error_message = ''
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ArtistApplication>(&query)
            .bind(id)
            .bind(ApplicationStatus::Rejected.as_str())
            .bind(admin_id)
            .fetch_one(&mut *conn)
            .await
    }

    /// Force an application into `ERROR` with the given failure detail.
    ///
    /// Runs outside any transition transaction. An `APPROVED` row is terminal
    /// and left as is. Returns `true` if the row was updated.
    pub async fn force_error(pool: &PgPool, id: DbId, message: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE artist_applications SET status = $2, last_error_message = $3
             WHERE id = $1 AND status <> $4",
        )
        .bind(id)
        .bind(ApplicationStatus::Error.as_str())
        .bind(message)
        .bind(ApplicationStatus::Approved.as_str())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Find the applicant's application that still holds the uniqueness slot
    /// (any status other than `REJECTED`).
    pub async fn find_active_for_applicant(
        pool: &PgPool,
        applicant_id: DbId,
    ) -> Result<Option<ArtistApplication>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM artist_applications
             WHERE applicant_id = $1 AND status <> $2"
        );
        sqlx::query_as::<_, ArtistApplication>(&query)
            .bind(applicant_id)
            .bind(ApplicationStatus::Rejected.as_str())
            .fetch_optional(pool)
            .await
    }

    /// List every application an applicant has submitted, newest first.
    pub async fn list_for_applicant(
        pool: &PgPool,
        applicant_id: DbId,
    ) -> Result<Vec<ArtistApplication>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM artist_applications
             WHERE applicant_id = $1
             ORDER BY submitted_at DESC, id DESC"
        );
        sqlx::query_as::<_, ArtistApplication>(&query)
            .bind(applicant_id)
            .fetch_all(pool)
            .await
    }

    /// List the most recently submitted applications, optionally filtered by status.
    pub async fn list_recent(
        pool: &PgPool,
        status: Option<ApplicationStatus>,
        limit: i64,
    ) -> Result<Vec<ArtistApplication>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM artist_applications
             WHERE ($1::TEXT IS NULL OR status = $1)
             ORDER BY submitted_at DESC, id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, ArtistApplication>(&query)
            .bind(status.map(|s| s.as_str()))
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Count applications in the given status.
    pub async fn count_by_status(
        pool: &PgPool,
        status: ApplicationStatus,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM artist_applications WHERE status = $1")
                .bind(status.as_str())
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }
}
