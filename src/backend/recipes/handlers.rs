/**
 * Owner-Scoped Record Handlers
 *
 * HTTP handlers for saved recipes, ratings and comments. All of these live
 * on the guarded router, so the access guard has already resolved the
 * caller's identity; every operation is scoped to that identity and never
 * to anything the request body or path claims.
 *
 * # Policy
 *
 * A record that exists but belongs to another user is reported as `404`,
 * identical to a record that does not exist. This hides existence from
 * non-owners and is applied consistently across all three record kinds.
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::error::ApiError;
use crate::backend::middleware::AuthUser;
use crate::backend::recipes::db;
use crate::shared::{Comment, CommentRequest, RateRequest, Rating, SaveRecipeRequest, SavedRecipe};

/// Save a recipe to the caller's collection
///
/// `POST /api/saved-recipes` → `201` with the stored record;
/// `409` if the meal is already in the collection.
pub async fn save_recipe(
    AuthUser(auth): AuthUser,
    State(pool): State<SqlitePool>,
    Json(request): Json<SaveRecipeRequest>,
) -> Result<(StatusCode, Json<SavedRecipe>), ApiError> {
    if request.meal_id.trim().is_empty() {
        return Err(ApiError::validation("meal_id", "must not be empty"));
    }
    if request.meal_name.trim().is_empty() {
        return Err(ApiError::validation("meal_name", "must not be empty"));
    }

    if db::find_saved(&pool, auth.user_id, &request.meal_id).await?.is_some() {
        return Err(ApiError::Conflict("Recipe already saved".to_string()));
    }

    let row = db::insert_saved(
        &pool,
        auth.user_id,
        request.meal_id,
        request.meal_name,
        request.meal_thumb,
    )
    .await?;

    tracing::debug!("user {} saved meal {}", auth.user_id, row.meal_id);
    Ok((StatusCode::CREATED, Json(row.into_shared())))
}

/// List the caller's saved recipes
///
/// `GET /api/saved-recipes` → `200` with the caller's collection only.
pub async fn list_saved_recipes(
    AuthUser(auth): AuthUser,
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<SavedRecipe>>, ApiError> {
    let rows = db::list_saved(&pool, auth.user_id).await?;
    Ok(Json(rows.into_iter().map(db::SavedRecipeRow::into_shared).collect()))
}

/// Remove a recipe from the caller's collection
///
/// `DELETE /api/saved-recipes/{meal_id}` → `204`; `404` when the caller has
/// no such save (including when the save belongs to someone else).
pub async fn delete_saved_recipe(
    AuthUser(auth): AuthUser,
    State(pool): State<SqlitePool>,
    Path(meal_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let removed = db::delete_saved(&pool, auth.user_id, &meal_id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound);
    }

    tracing::debug!("user {} removed meal {}", auth.user_id, meal_id);
    Ok(StatusCode::NO_CONTENT)
}

/// Rate a recipe, replacing any previous score
///
/// `POST /api/ratings` → `201` with the stored rating.
pub async fn rate_recipe(
    AuthUser(auth): AuthUser,
    State(pool): State<SqlitePool>,
    Json(request): Json<RateRequest>,
) -> Result<(StatusCode, Json<Rating>), ApiError> {
    if request.meal_id.trim().is_empty() {
        return Err(ApiError::validation("meal_id", "must not be empty"));
    }
    if !(1..=5).contains(&request.score) {
        return Err(ApiError::validation("score", "must be between 1 and 5"));
    }

    let row = db::upsert_rating(&pool, auth.user_id, request.meal_id, request.score).await?;
    Ok((StatusCode::CREATED, Json(row.into_shared())))
}

/// List the caller's ratings
pub async fn list_ratings(
    AuthUser(auth): AuthUser,
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<Rating>>, ApiError> {
    let rows = db::list_ratings(&pool, auth.user_id).await?;
    Ok(Json(rows.into_iter().map(db::RatingRow::into_shared).collect()))
}

/// Remove the caller's rating for a meal
pub async fn delete_rating(
    AuthUser(auth): AuthUser,
    State(pool): State<SqlitePool>,
    Path(meal_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let removed = db::delete_rating(&pool, auth.user_id, &meal_id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Post a comment on a recipe
///
/// `POST /api/comments` → `201` with the stored comment.
pub async fn post_comment(
    AuthUser(auth): AuthUser,
    State(pool): State<SqlitePool>,
    Json(request): Json<CommentRequest>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    if request.meal_id.trim().is_empty() {
        return Err(ApiError::validation("meal_id", "must not be empty"));
    }
    let content = request.content.trim().to_string();
    if content.is_empty() {
        return Err(ApiError::validation("content", "must not be empty"));
    }
    if content.len() > 2000 {
        return Err(ApiError::validation("content", "must be at most 2000 characters"));
    }

    let row = db::insert_comment(&pool, auth.user_id, request.meal_id, content).await?;
    Ok((StatusCode::CREATED, Json(row.into_shared())))
}

/// List the caller's comments
pub async fn list_comments(
    AuthUser(auth): AuthUser,
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let rows = db::list_comments(&pool, auth.user_id).await?;
    Ok(Json(rows.into_iter().map(db::CommentRow::into_shared).collect()))
}

/// Delete the caller's own comment
///
/// `DELETE /api/comments/{id}` → `204`; another user's comment id yields
/// `404`, indistinguishable from an unknown id.
pub async fn delete_comment(
    AuthUser(auth): AuthUser,
    State(pool): State<SqlitePool>,
    Path(comment_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let removed = db::delete_comment(&pool, auth.user_id, comment_id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}
