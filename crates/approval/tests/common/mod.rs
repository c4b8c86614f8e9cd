//! Shared fixtures for workflow integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use gallery_core::artist_application::ApplicationStatus;
use gallery_core::types::DbId;
use gallery_db::models::artist_application::{ArtistApplication, CreateArtistApplication};
use gallery_db::models::user::{CreateUser, User};
use gallery_db::repositories::{ArtistApplicationRepo, UserRepo};
use sqlx::PgPool;

/// Create a user with a unique username.
pub async fn create_user(pool: &PgPool, username: &str, is_staff: bool) -> User {
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@test.com"),
        is_staff,
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Create a staff user to act as the approving admin.
pub async fn create_admin(pool: &PgPool) -> User {
    create_user(pool, "gallery_admin", true).await
}

/// Valid application details for `applicant_id`.
pub fn application_input(applicant_id: DbId, name: &str) -> CreateArtistApplication {
    CreateArtistApplication {
        applicant_id,
        name: name.to_string(),
        gender: "F".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1992, 3, 14).unwrap(),
        email: format!("{}@artist.test", name.to_lowercase()),
        phone: "010-1234-5678".to_string(),
    }
}

/// Create a fresh applicant user plus a `PENDING` application for them.
pub async fn create_pending_application(pool: &PgPool, name: &str) -> ArtistApplication {
    let applicant = create_user(pool, &format!("applicant_{}", name.to_lowercase()), false).await;
    ArtistApplicationRepo::create(pool, &application_input(applicant.id, name))
        .await
        .expect("application creation should succeed")
}

/// Overwrite an application's status directly, bypassing the workflow.
pub async fn set_status(pool: &PgPool, id: DbId, status: ApplicationStatus) {
    sqlx::query("UPDATE artist_applications SET status = $2 WHERE id = $1")
        .bind(id)
        .bind(status.as_str())
        .execute(pool)
        .await
        .expect("status update should succeed");
}

/// Reload an application, panicking if it vanished.
pub async fn reload(pool: &PgPool, id: DbId) -> ArtistApplication {
    ArtistApplicationRepo::find_by_id(pool, id)
        .await
        .expect("query should succeed")
        .expect("application should exist")
}

/// Make every profile insert for `user_id` fail with a non-constraint error.
pub async fn fail_profile_inserts_for(pool: &PgPool, user_id: DbId) {
    install_profile_insert_trigger(pool, user_id, "RAISE EXCEPTION 'profile storage unavailable'")
        .await;
}

/// Make every profile insert for `user_id` fail with SQLSTATE 23505, as a
/// uniqueness conflict outside the `ON CONFLICT` target would.
pub async fn conflict_profile_inserts_for(pool: &PgPool, user_id: DbId) {
    install_profile_insert_trigger(
        pool,
        user_id,
        "RAISE EXCEPTION 'duplicate artist profile' USING ERRCODE = 'unique_violation'",
    )
    .await;
}

async fn install_profile_insert_trigger(pool: &PgPool, user_id: DbId, raise: &str) {
    let function = format!(
        "CREATE OR REPLACE FUNCTION test_fail_profile_insert() RETURNS trigger AS $$
         BEGIN
             IF NEW.user_id = {user_id} THEN
                 {raise};
             END IF;
             RETURN NEW;
         END;
         $$ LANGUAGE plpgsql"
    );
    sqlx::query(&function)
        .execute(pool)
        .await
        .expect("trigger function should be created");
    sqlx::query(
        "CREATE TRIGGER trg_test_fail_profile_insert
         BEFORE INSERT ON artist_profiles
         FOR EACH ROW EXECUTE FUNCTION test_fail_profile_insert()",
    )
    .execute(pool)
    .await
    .expect("trigger should be created");
}

/// Remove the trigger installed by [`fail_profile_inserts_for`] or
/// [`conflict_profile_inserts_for`].
pub async fn restore_profile_inserts(pool: &PgPool) {
    sqlx::query("DROP TRIGGER IF EXISTS trg_test_fail_profile_insert ON artist_profiles")
        .execute(pool)
        .await
        .expect("trigger should be dropped");
}

/// Make any update that moves application `application_id` to `REJECTED` fail.
pub async fn fail_rejection_of(pool: &PgPool, application_id: DbId) {
    let function = format!(
        "CREATE OR REPLACE FUNCTION test_fail_rejection() RETURNS trigger AS $$
         BEGIN
             IF NEW.status = 'REJECTED' AND NEW.id = {application_id} THEN
                 RAISE EXCEPTION 'rejection storage unavailable';
             END IF;
             RETURN NEW;
         END;
         $$ LANGUAGE plpgsql"
    );
    sqlx::query(&function)
        .execute(pool)
        .await
        .expect("trigger function should be created");
    sqlx::query(
        "CREATE TRIGGER trg_test_fail_rejection
         BEFORE UPDATE ON artist_applications
         FOR EACH ROW EXECUTE FUNCTION test_fail_rejection()",
    )
    .execute(pool)
    .await
    .expect("trigger should be created");
}

/// Remove the trigger installed by [`fail_rejection_of`].
pub async fn restore_rejections(pool: &PgPool) {
    sqlx::query("DROP TRIGGER IF EXISTS trg_test_fail_rejection ON artist_applications")
        .execute(pool)
        .await
        .expect("trigger should be dropped");
}
