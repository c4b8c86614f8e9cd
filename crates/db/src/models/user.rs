//! User account model and DTOs.
//!
//! Only the columns the artist workflow needs: identity, contact and the
//! staff flag checked before an approval batch runs.

use gallery_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub is_staff: bool,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a new user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub is_staff: bool,
}
