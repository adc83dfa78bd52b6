/**
 * Current-User Handler
 *
 * GET /api/auth/me on the guarded router: returns the summary of the user
 * the access guard resolved for this request.
 */

use axum::{extract::State, response::Json};
use sqlx::SqlitePool;

use crate::backend::auth::users::find_by_id;
use crate::backend::error::ApiError;
use crate::backend::middleware::AuthUser;
use crate::shared::UserSummary;

/// Get the current user's summary
///
/// The identity comes from the verified token; the lookup only fills in
/// the current username. A valid token whose account has since been
/// removed yields 404.
pub async fn me(
    AuthUser(auth): AuthUser,
    State(pool): State<SqlitePool>,
) -> Result<Json<UserSummary>, ApiError> {
    let user = find_by_id(&pool, auth.user_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(user.summary()))
}
