//! Staff authorisation for workflow commands.

use gallery_core::error::CoreError;
use gallery_core::types::DbId;
use gallery_db::models::user::User;
use gallery_db::repositories::UserRepo;
use gallery_db::DbPool;

use crate::error::AdminResult;

/// Load the acting user and require an active staff account.
///
/// Runs before any application is touched, so an unauthorised caller never
/// leaves a trace in `processed_by`.
pub async fn require_staff(pool: &DbPool, user_id: DbId) -> AdminResult<User> {
    let user = UserRepo::find_by_id(pool, user_id)
        .await?
        .ok_or_else(|| CoreError::not_found("User", user_id))?;

    if !user.is_active {
        return Err(CoreError::Forbidden("Account is deactivated".into()).into());
    }
    if !user.is_staff {
        return Err(CoreError::Forbidden("Staff role required".into()).into());
    }
    Ok(user)
}
