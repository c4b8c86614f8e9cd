//! Command-line surface.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use gallery_core::artist_application::ApplicationStatus;
use gallery_core::types::DbId;

#[derive(Parser, Debug)]
#[command(
    name = "gallery-admin",
    about = "Review and process artist applications",
    version
)]
pub struct Cli {
    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Approve applications and create the applicants' artist profiles
    Approve(BatchArgs),
    /// Reject applications
    Reject(BatchArgs),
    /// List recent applications, newest first
    List(ListArgs),
    /// Show the number of applications waiting for review
    Pending,
    /// Submit an application on behalf of a user
    Apply(ApplyArgs),
    /// Apply pending database migrations
    Migrate,
}

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Id of the staff member performing the action
    #[arg(long = "admin")]
    pub admin_id: DbId,

    /// Application ids to process
    #[arg(required = true, num_args = 1..)]
    pub ids: Vec<DbId>,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show applications in this status
    #[arg(long, value_parser = parse_status)]
    pub status: Option<ApplicationStatus>,

    /// Maximum number of rows
    #[arg(long, default_value_t = 20)]
    pub limit: i64,
}

#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Id of the applying user
    #[arg(long = "user")]
    pub user_id: DbId,
    #[arg(long)]
    pub name: String,
    /// M or F
    #[arg(long)]
    pub gender: String,
    /// Birth date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub birth_date: NaiveDate,
    #[arg(long)]
    pub email: String,
    /// Phone number, 000-0000-0000
    #[arg(long)]
    pub phone: String,
}

fn parse_status(raw: &str) -> Result<ApplicationStatus, String> {
    ApplicationStatus::from_str(&raw.to_ascii_uppercase()).map_err(|e| e.to_string())
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| format!("invalid date '{raw}': {e}"))
}
