//! Shared scalar types.

use chrono::{DateTime, NaiveDate, Utc};

/// Primary keys of users, applications and profiles (PostgreSQL BIGSERIAL).
pub type DbId = i64;

/// Submission, processing and creation timestamps, always UTC.
pub type Timestamp = DateTime<Utc>;

/// Today's calendar date in UTC, the reference for birth-date validation.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}
