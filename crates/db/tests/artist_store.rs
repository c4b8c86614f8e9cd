//! Integration tests for the artist application and profile store.
//!
//! Exercises the storage-level invariants directly:
//! - one non-rejected application per applicant
//! - one profile per user
//! - status domain CHECK constraint
//! - read helpers used by the admin listing and dashboard

use chrono::NaiveDate;
use gallery_core::artist_application::ApplicationStatus;
use gallery_db::models::artist_application::CreateArtistApplication;
use gallery_db::models::artist_profile::CreateArtistProfile;
use gallery_db::models::user::CreateUser;
use gallery_db::repositories::artist_application_repo::UQ_ACTIVE_APPLICANT;
use gallery_db::repositories::artist_profile_repo::UQ_PROFILE_USER;
use gallery_db::repositories::{ArtistApplicationRepo, ArtistProfileRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_user(pool: &PgPool, username: &str) -> i64 {
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@test.com"),
        is_staff: false,
    };
    UserRepo::create(pool, &input).await.unwrap().id
}

fn new_application(applicant_id: i64) -> CreateArtistApplication {
    CreateArtistApplication {
        applicant_id,
        name: "Painter".to_string(),
        gender: "M".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1988, 7, 1).unwrap(),
        email: "painter@test.com".to_string(),
        phone: "010-987-6543".to_string(),
    }
}

fn new_profile(user_id: i64) -> CreateArtistProfile {
    CreateArtistProfile {
        user_id,
        name: "Painter".to_string(),
        gender: "M".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1988, 7, 1).unwrap(),
        email: "painter@test.com".to_string(),
        phone: "010-987-6543".to_string(),
        is_approved: true,
    }
}

async fn set_status(pool: &PgPool, id: i64, status: ApplicationStatus) {
    sqlx::query("UPDATE artist_applications SET status = $2 WHERE id = $1")
        .bind(id)
        .bind(status.as_str())
        .execute(pool)
        .await
        .unwrap();
}

// ---------------------------------------------------------------------------
// Applications
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_second_live_application_violates_unique_index(pool: PgPool) {
    let user = new_user(&pool, "dup").await;
    ArtistApplicationRepo::create(&pool, &new_application(user))
        .await
        .unwrap();

    let err = ArtistApplicationRepo::create(&pool, &new_application(user))
        .await
        .unwrap_err();
    assert!(gallery_db::is_unique_violation(&err, Some(UQ_ACTIVE_APPLICANT)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_each_live_status_blocks_a_new_application(pool: PgPool) {
    for (i, status) in [
        ApplicationStatus::Pending,
        ApplicationStatus::Processing,
        ApplicationStatus::Approved,
        ApplicationStatus::Error,
    ]
    .into_iter()
    .enumerate()
    {
        let user = new_user(&pool, &format!("live_{i}")).await;
        let app = ArtistApplicationRepo::create(&pool, &new_application(user))
            .await
            .unwrap();
        set_status(&pool, app.id, status).await;

        let result = ArtistApplicationRepo::create(&pool, &new_application(user)).await;
        assert!(result.is_err(), "{status} must hold the applicant slot");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rejected_application_frees_the_slot(pool: PgPool) {
    let user = new_user(&pool, "again").await;
    let first = ArtistApplicationRepo::create(&pool, &new_application(user))
        .await
        .unwrap();
    set_status(&pool, first.id, ApplicationStatus::Rejected).await;

    let second = ArtistApplicationRepo::create(&pool, &new_application(user))
        .await
        .expect("re-application after rejection must be allowed");
    assert_eq!(second.status, "PENDING");

    let active = ArtistApplicationRepo::find_active_for_applicant(&pool, user)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(active.id, second.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_status_rejected_by_check_constraint(pool: PgPool) {
    let user = new_user(&pool, "bogus").await;
    let app = ArtistApplicationRepo::create(&pool, &new_application(user))
        .await
        .unwrap();

    let result = sqlx::query("UPDATE artist_applications SET status = 'BOGUS' WHERE id = $1")
        .bind(app.id)
        .execute(&pool)
        .await;
    assert!(result.is_err());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_existing_ids_dedupes_and_drops_unknown(pool: PgPool) {
    let a = new_user(&pool, "ids_a").await;
    let b = new_user(&pool, "ids_b").await;
    let app_a = ArtistApplicationRepo::create(&pool, &new_application(a))
        .await
        .unwrap();
    let app_b = ArtistApplicationRepo::create(&pool, &new_application(b))
        .await
        .unwrap();

    let mut ids =
        ArtistApplicationRepo::existing_ids(&pool, &[app_a.id, app_b.id, app_a.id, 999_999])
            .await
            .unwrap();
    ids.sort_unstable();

    let mut expected = vec![app_a.id, app_b.id];
    expected.sort_unstable();
    assert_eq!(ids, expected);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_force_error_records_message(pool: PgPool) {
    let user = new_user(&pool, "err").await;
    let app = ArtistApplicationRepo::create(&pool, &new_application(user))
        .await
        .unwrap();

    let updated = ArtistApplicationRepo::force_error(&pool, app.id, "error: disk full")
        .await
        .unwrap();
    assert!(updated);

    let app = ArtistApplicationRepo::find_by_id(&pool, app.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(app.status().unwrap(), ApplicationStatus::Error);
    assert_eq!(app.last_error_message, "error: disk full");

    assert!(!ArtistApplicationRepo::force_error(&pool, 123_456, "x")
        .await
        .unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_force_error_leaves_approved_row_alone(pool: PgPool) {
    let user = new_user(&pool, "settled").await;
    let app = ArtistApplicationRepo::create(&pool, &new_application(user))
        .await
        .unwrap();
    set_status(&pool, app.id, ApplicationStatus::Approved).await;

    let updated = ArtistApplicationRepo::force_error(&pool, app.id, "error: pool timed out")
        .await
        .unwrap();
    assert!(!updated);

    let app = ArtistApplicationRepo::find_by_id(&pool, app.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(app.status().unwrap(), ApplicationStatus::Approved);
    assert_eq!(app.last_error_message, "");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_recent_and_count_by_status(pool: PgPool) {
    let mut ids = Vec::new();
    for i in 0..3 {
        let user = new_user(&pool, &format!("list_{i}")).await;
        let app = ArtistApplicationRepo::create(&pool, &new_application(user))
            .await
            .unwrap();
        ids.push(app.id);
    }
    set_status(&pool, ids[0], ApplicationStatus::Rejected).await;

    let all = ArtistApplicationRepo::list_recent(&pool, None, 10)
        .await
        .unwrap();
    assert_eq!(all.len(), 3);
    // Newest first.
    let listed: Vec<i64> = all.iter().map(|a| a.id).collect();
    let mut expected = ids.clone();
    expected.reverse();
    assert_eq!(listed, expected);

    let pending = ArtistApplicationRepo::list_recent(&pool, Some(ApplicationStatus::Pending), 10)
        .await
        .unwrap();
    assert_eq!(pending.len(), 2);

    let limited = ArtistApplicationRepo::list_recent(&pool, None, 1)
        .await
        .unwrap();
    assert_eq!(limited.len(), 1);

    assert_eq!(
        ArtistApplicationRepo::count_by_status(&pool, ApplicationStatus::Pending)
            .await
            .unwrap(),
        2
    );
    assert_eq!(
        ArtistApplicationRepo::count_by_status(&pool, ApplicationStatus::Rejected)
            .await
            .unwrap(),
        1
    );
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_one_profile_per_user(pool: PgPool) {
    let user = new_user(&pool, "solo").await;
    ArtistProfileRepo::create(&pool, &new_profile(user))
        .await
        .unwrap();

    let err = ArtistProfileRepo::create(&pool, &new_profile(user))
        .await
        .unwrap_err();
    assert!(gallery_db::is_unique_violation(&err, Some(UQ_PROFILE_USER)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_if_absent(pool: PgPool) {
    let user = new_user(&pool, "absent").await;
    let mut conn = pool.acquire().await.unwrap();

    let created = ArtistProfileRepo::create_if_absent(&mut conn, &new_profile(user))
        .await
        .unwrap();
    assert!(created.is_some());

    let mut other = new_profile(user);
    other.name = "Someone Else".to_string();
    let second = ArtistProfileRepo::create_if_absent(&mut conn, &other)
        .await
        .unwrap();
    assert!(second.is_none());

    let profile = ArtistProfileRepo::find_by_user(&pool, user)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(profile.name, "Painter");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_is_approved_artist(pool: PgPool) {
    let approved = new_user(&pool, "approved").await;
    let unapproved = new_user(&pool, "unapproved").await;
    let stranger = new_user(&pool, "stranger").await;

    ArtistProfileRepo::create(&pool, &new_profile(approved))
        .await
        .unwrap();
    let mut pending_profile = new_profile(unapproved);
    pending_profile.is_approved = false;
    ArtistProfileRepo::create(&pool, &pending_profile)
        .await
        .unwrap();

    assert!(ArtistProfileRepo::is_approved_artist(&pool, approved)
        .await
        .unwrap());
    assert!(!ArtistProfileRepo::is_approved_artist(&pool, unapproved)
        .await
        .unwrap());
    assert!(!ArtistProfileRepo::is_approved_artist(&pool, stranger)
        .await
        .unwrap());
}
