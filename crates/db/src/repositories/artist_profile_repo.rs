//! Repository for the `artist_profiles` table.

use gallery_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::artist_profile::{ArtistProfile, CreateArtistProfile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, gender, birth_date, email, phone, is_approved, created_at";

/// Name of the one-profile-per-user unique constraint.
pub const UQ_PROFILE_USER: &str = "uq_artist_profiles_user_id";

/// Provides CRUD operations for artist profiles.
pub struct ArtistProfileRepo;

impl ArtistProfileRepo {
    /// Insert a profile, failing with a unique violation if the user already has one.
    pub async fn create(
        pool: &PgPool,
        input: &CreateArtistProfile,
    ) -> Result<ArtistProfile, sqlx::Error> {
        let query = format!(
            "INSERT INTO artist_profiles
                (user_id, name, gender, birth_date, email, phone, is_approved)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ArtistProfile>(&query)
            .bind(input.user_id)
            .bind(&input.name)
            .bind(&input.gender)
            .bind(input.birth_date)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(input.is_approved)
            .fetch_one(pool)
            .await
    }

    /// Insert a profile unless the user already has one.
    ///
    /// Returns `None` when a profile already existed; the existing row is left
    /// untouched.
    pub async fn create_if_absent(
        conn: &mut PgConnection,
        input: &CreateArtistProfile,
    ) -> Result<Option<ArtistProfile>, sqlx::Error> {
        let query = format!(
            "INSERT INTO artist_profiles
                (user_id, name, gender, birth_date, email, phone, is_approved)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (user_id) DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ArtistProfile>(&query)
            .bind(input.user_id)
            .bind(&input.name)
            .bind(&input.gender)
            .bind(input.birth_date)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(input.is_approved)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Find the profile belonging to a user.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<ArtistProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM artist_profiles WHERE user_id = $1");
        sqlx::query_as::<_, ArtistProfile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Count profiles for a user. Always 0 or 1 while the constraint holds.
    pub async fn count_for_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM artist_profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Whether the user holds an approved profile.
    ///
    /// Gates artist-only actions such as registering artworks or exhibitions.
    pub async fn is_approved_artist(pool: &PgPool, user_id: DbId) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS(
                SELECT 1 FROM artist_profiles WHERE user_id = $1 AND is_approved = true
             )",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }
}
