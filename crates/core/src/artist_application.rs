//! Artist application status machine, outcome types and applicant validation.
//!
//! Statuses are stored as upper-case strings in `artist_applications.status`;
//! the CHECK constraint in the migrations must list exactly the values of
//! [`VALID_STATUSES`].

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

pub const STATUS_PENDING: &str = "PENDING";
pub const STATUS_PROCESSING: &str = "PROCESSING";
pub const STATUS_APPROVED: &str = "APPROVED";
pub const STATUS_REJECTED: &str = "REJECTED";
pub const STATUS_ERROR: &str = "ERROR";

/// All valid status values.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_PENDING,
    STATUS_PROCESSING,
    STATUS_APPROVED,
    STATUS_REJECTED,
    STATUS_ERROR,
];

/// Message recorded on an application whose applicant already had a profile.
pub const PROFILE_EXISTS_MESSAGE: &str = "profile already exists";

// ---------------------------------------------------------------------------
// Applicant field limits
// ---------------------------------------------------------------------------

/// Maximum length of an applicant name, in characters.
pub const MAX_NAME_LEN: usize = 16;

/// Maximum length of a phone number (`000-0000-0000`).
pub const MAX_PHONE_LEN: usize = 13;

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{3}-\d{3,4}-\d{4}$").unwrap_or_else(|e| panic!("invalid phone regex: {e}"))
});

// ---------------------------------------------------------------------------
// Application status
// ---------------------------------------------------------------------------

/// Lifecycle status of an artist application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    /// Submitted and waiting for staff review.
    Pending,
    /// An approval is in flight under a row lock.
    Processing,
    /// A profile was created, or already existed.
    Approved,
    /// Rejected by staff. Does not count against re-application.
    Rejected,
    /// The last transition failed; see `last_error_message`.
    Error,
}

impl ApplicationStatus {
    /// Return the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => STATUS_PENDING,
            Self::Processing => STATUS_PROCESSING,
            Self::Approved => STATUS_APPROVED,
            Self::Rejected => STATUS_REJECTED,
            Self::Error => STATUS_ERROR,
        }
    }

    /// Parse from a string, returning an error for unknown statuses.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            STATUS_PENDING => Ok(Self::Pending),
            STATUS_PROCESSING => Ok(Self::Processing),
            STATUS_APPROVED => Ok(Self::Approved),
            STATUS_REJECTED => Ok(Self::Rejected),
            STATUS_ERROR => Ok(Self::Error),
            other => Err(CoreError::Validation(format!(
                "Unknown application status: '{other}'. Valid statuses: {}",
                VALID_STATUSES.join(", ")
            ))),
        }
    }

    /// Whether staff may approve or reject an application in this status.
    pub fn is_actionable(&self) -> bool {
        self.can_transition_to(Self::Processing) && self.can_transition_to(Self::Rejected)
    }

    /// Whether the workflow may move an application from `self` to `next`.
    ///
    /// Forcing a row into [`ApplicationStatus::Error`] after a failed
    /// transition bypasses this check.
    pub fn can_transition_to(&self, next: ApplicationStatus) -> bool {
        use ApplicationStatus::*;
        matches!(
            (self, next),
            (Pending | Error, Processing) | (Pending | Error, Rejected) | (Processing, Approved)
        )
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Transition outcome
// ---------------------------------------------------------------------------

/// Result of processing a single application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessOutcome {
    Approved,
    Rejected,
    /// Nothing new happened: the application was not actionable, or the
    /// applicant already had a profile.
    Skipped,
}

impl ProcessOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Skipped => "SKIPPED",
        }
    }
}

impl std::fmt::Display for ProcessOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Gender
// ---------------------------------------------------------------------------

pub const GENDER_MALE: &str = "M";
pub const GENDER_FEMALE: &str = "F";

/// All valid gender codes.
pub const VALID_GENDERS: &[&str] = &[GENDER_MALE, GENDER_FEMALE];

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Validate the applicant name: non-blank and at most [`MAX_NAME_LEN`] characters.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Name must not be empty".to_string()));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a gender code against [`VALID_GENDERS`].
pub fn validate_gender(gender: &str) -> Result<(), CoreError> {
    if VALID_GENDERS.contains(&gender) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid gender '{gender}'. Must be one of: {}",
            VALID_GENDERS.join(", ")
        )))
    }
}

/// Validate that a birth date is not after `today`.
pub fn validate_birth_date(birth_date: NaiveDate, today: NaiveDate) -> Result<(), CoreError> {
    if birth_date > today {
        return Err(CoreError::Validation(
            "Birth date must not be in the future".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if !email.validate_email() {
        return Err(CoreError::Validation(format!(
            "Invalid email address '{email}'"
        )));
    }
    Ok(())
}

/// Validate a phone number in `000-0000-0000` or `000-000-0000` form.
pub fn validate_phone(phone: &str) -> Result<(), CoreError> {
    if phone.len() > MAX_PHONE_LEN || !PHONE_RE.is_match(phone) {
        return Err(CoreError::Validation(
            "Phone must be formatted as 000-0000-0000 or 000-000-0000".to_string(),
        ));
    }
    Ok(())
}

/// Validate every applicant-supplied field of an application.
pub fn validate_applicant(
    name: &str,
    gender: &str,
    birth_date: NaiveDate,
    email: &str,
    phone: &str,
    today: NaiveDate,
) -> Result<(), CoreError> {
    validate_name(name)?;
    validate_gender(gender)?;
    validate_birth_date(birth_date, today)?;
    validate_email(email)?;
    validate_phone(phone)
}
