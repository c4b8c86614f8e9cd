//! Command handlers. Each returns the text to print on success.

use std::fmt::Write as _;

use gallery_approval::{
    process_multiple_approve, process_multiple_reject, submit_application, ApproveResult,
    RejectResult,
};
use gallery_core::artist_application::ApplicationStatus;
use gallery_core::error::CoreError;
use gallery_core::types::DbId;
use gallery_db::models::artist_application::{ArtistApplication, CreateArtistApplication};
use gallery_db::repositories::ArtistApplicationRepo;
use gallery_db::DbPool;

use crate::auth::require_staff;
use crate::cli::{ApplyArgs, BatchArgs, Command, ListArgs};
use crate::error::{AdminError, AdminResult};

/// Dispatch a parsed command.
pub async fn run(pool: &DbPool, command: Command, json: bool) -> AdminResult<String> {
    match command {
        Command::Approve(args) => approve(pool, args, json).await,
        Command::Reject(args) => reject(pool, args, json).await,
        Command::List(args) => list(pool, args, json).await,
        Command::Pending => pending(pool, json).await,
        Command::Apply(args) => apply(pool, args, json).await,
        Command::Migrate => {
            gallery_db::run_migrations(pool).await?;
            Ok("Migrations applied".to_string())
        }
    }
}

async fn approve(pool: &DbPool, args: BatchArgs, json: bool) -> AdminResult<String> {
    let admin = require_staff(pool, args.admin_id).await?;
    let ids = validate_ids(&args.ids)?;
    let result = process_multiple_approve(pool, &ids, admin.id).await?;
    if json {
        return to_json(&result);
    }
    Ok(render_approve(&result))
}

async fn reject(pool: &DbPool, args: BatchArgs, json: bool) -> AdminResult<String> {
    let admin = require_staff(pool, args.admin_id).await?;
    let ids = validate_ids(&args.ids)?;
    let result = process_multiple_reject(pool, &ids, admin.id).await?;
    if json {
        return to_json(&result);
    }
    Ok(render_reject(&result))
}

async fn list(pool: &DbPool, args: ListArgs, json: bool) -> AdminResult<String> {
    if args.limit <= 0 {
        return Err(AdminError::BadRequest("limit must be positive".into()));
    }
    let applications = ArtistApplicationRepo::list_recent(pool, args.status, args.limit).await?;
    if json {
        return to_json(&applications);
    }
    Ok(render_list(&applications))
}

async fn pending(pool: &DbPool, json: bool) -> AdminResult<String> {
    let count = ArtistApplicationRepo::count_by_status(pool, ApplicationStatus::Pending).await?;
    if json {
        return to_json(&serde_json::json!({ "pending": count }));
    }
    Ok(format!("{count} pending applications"))
}

async fn apply(pool: &DbPool, args: ApplyArgs, json: bool) -> AdminResult<String> {
    let input = CreateArtistApplication {
        applicant_id: args.user_id,
        name: args.name,
        gender: args.gender,
        birth_date: args.birth_date,
        email: args.email,
        phone: args.phone,
    };
    let application = submit_application(pool, &input).await?;
    if json {
        return to_json(&application);
    }
    Ok(format!(
        "Application {} submitted for user {} ({})",
        application.id, application.applicant_id, application.status
    ))
}

/// Reject non-positive ids before they reach the workflow.
pub fn validate_ids(ids: &[DbId]) -> AdminResult<Vec<DbId>> {
    if ids.is_empty() {
        return Err(AdminError::BadRequest("No applications selected".into()));
    }
    if let Some(bad) = ids.iter().find(|id| **id <= 0) {
        return Err(AdminError::BadRequest(format!(
            "Invalid application id: {bad}"
        )));
    }
    Ok(ids.to_vec())
}

fn to_json<T: serde::Serialize>(value: &T) -> AdminResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| CoreError::Internal(format!("Failed to serialize output: {e}")).into())
}

/// Summary line followed by one line per non-empty bucket.
pub fn render_approve(result: &ApproveResult) -> String {
    let mut out = result.summary();
    push_bucket(&mut out, "approved", &result.approved);
    push_bucket(&mut out, "skipped", &result.skipped);
    push_bucket(&mut out, "failed", &result.failed);
    out
}

pub fn render_reject(result: &RejectResult) -> String {
    let mut out = result.summary();
    push_bucket(&mut out, "rejected", &result.rejected);
    push_bucket(&mut out, "skipped", &result.skipped);
    push_bucket(&mut out, "failed", &result.failed);
    out
}

fn push_bucket(out: &mut String, label: &str, ids: &[DbId]) {
    if ids.is_empty() {
        return;
    }
    let joined = ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let _ = write!(out, "\n  {label}: {joined}");
}

pub fn render_list(applications: &[ArtistApplication]) -> String {
    if applications.is_empty() {
        return "No applications".to_string();
    }
    let mut out = format!(
        "{:>6}  {:<10}  {:<16}  {:>9}  {:<20}  {}",
        "ID", "STATUS", "NAME", "APPLICANT", "SUBMITTED", "NOTE"
    );
    for app in applications {
        let _ = write!(
            out,
            "\n{:>6}  {:<10}  {:<16}  {:>9}  {:<20}  {}",
            app.id,
            app.status,
            app.name,
            app.applicant_id,
            app.submitted_at.format("%Y-%m-%d %H:%M:%S"),
            app.last_error_message
        );
    }
    out
}
