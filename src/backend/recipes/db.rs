/**
 * Owner-Scoped Record Store
 *
 * Database operations for saved recipes, ratings and comments. Every query
 * takes the owner's user id and filters on it, so a caller can neither see
 * nor touch another user's records. Callers supply the id resolved by the
 * access guard; nothing here accepts a client-supplied owner.
 */

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::shared::{Comment, Rating, SavedRecipe};

/// A saved-recipe row as stored
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SavedRecipeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub meal_id: String,
    pub meal_name: String,
    pub meal_thumb: String,
    pub created_at: DateTime<Utc>,
}

impl SavedRecipeRow {
    pub fn into_shared(self) -> SavedRecipe {
        SavedRecipe {
            id: self.id.to_string(),
            meal_id: self.meal_id,
            meal_name: self.meal_name,
            meal_thumb: self.meal_thumb,
            created_at: self.created_at,
        }
    }
}

/// A rating row as stored
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RatingRow {
    pub user_id: Uuid,
    pub meal_id: String,
    pub score: i32,
    pub created_at: DateTime<Utc>,
}

impl RatingRow {
    pub fn into_shared(self) -> Rating {
        Rating {
            meal_id: self.meal_id,
            score: self.score,
            created_at: self.created_at,
        }
    }
}

/// A comment row as stored
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CommentRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub meal_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl CommentRow {
    pub fn into_shared(self) -> Comment {
        Comment {
            id: self.id.to_string(),
            meal_id: self.meal_id,
            content: self.content,
            created_at: self.created_at,
        }
    }
}

/// Find a user's saved recipe for a meal, if any
pub async fn find_saved(
    pool: &SqlitePool,
    user_id: Uuid,
    meal_id: &str,
) -> Result<Option<SavedRecipeRow>, sqlx::Error> {
    sqlx::query_as::<_, SavedRecipeRow>(
        r#"
        SELECT id, user_id, meal_id, meal_name, meal_thumb, created_at
        FROM saved_recipes
        WHERE user_id = ? AND meal_id = ?
        "#,
    )
    .bind(user_id)
    .bind(meal_id)
    .fetch_optional(pool)
    .await
}

/// Save a recipe into a user's collection
pub async fn insert_saved(
    pool: &SqlitePool,
    user_id: Uuid,
    meal_id: String,
    meal_name: String,
    meal_thumb: String,
) -> Result<SavedRecipeRow, sqlx::Error> {
    let row = SavedRecipeRow {
        id: Uuid::new_v4(),
        user_id,
        meal_id,
        meal_name,
        meal_thumb,
        created_at: Utc::now(),
    };

    sqlx::query(
        r#"
        INSERT INTO saved_recipes (id, user_id, meal_id, meal_name, meal_thumb, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(row.id)
    .bind(row.user_id)
    .bind(&row.meal_id)
    .bind(&row.meal_name)
    .bind(&row.meal_thumb)
    .bind(row.created_at)
    .execute(pool)
    .await?;

    Ok(row)
}

/// All recipes saved by a user, newest first
pub async fn list_saved(
    pool: &SqlitePool,
    user_id: Uuid,
) -> Result<Vec<SavedRecipeRow>, sqlx::Error> {
    sqlx::query_as::<_, SavedRecipeRow>(
        r#"
        SELECT id, user_id, meal_id, meal_name, meal_thumb, created_at
        FROM saved_recipes
        WHERE user_id = ?
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Remove a recipe from a user's collection
///
/// Returns the number of rows removed: 0 means the user had not saved that
/// meal (or it belongs to someone else, which looks identical).
pub async fn delete_saved(
    pool: &SqlitePool,
    user_id: Uuid,
    meal_id: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM saved_recipes
        WHERE user_id = ? AND meal_id = ?
        "#,
    )
    .bind(user_id)
    .bind(meal_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Set a user's rating for a meal, replacing any previous score
pub async fn upsert_rating(
    pool: &SqlitePool,
    user_id: Uuid,
    meal_id: String,
    score: i32,
) -> Result<RatingRow, sqlx::Error> {
    let row = RatingRow {
        user_id,
        meal_id,
        score,
        created_at: Utc::now(),
    };

    sqlx::query(
        r#"
        INSERT INTO ratings (user_id, meal_id, score, created_at)
        VALUES (?, ?, ?, ?)
        ON CONFLICT (user_id, meal_id)
        DO UPDATE SET score = excluded.score, created_at = excluded.created_at
        "#,
    )
    .bind(row.user_id)
    .bind(&row.meal_id)
    .bind(row.score)
    .bind(row.created_at)
    .execute(pool)
    .await?;

    Ok(row)
}

/// All ratings by a user, newest first
pub async fn list_ratings(pool: &SqlitePool, user_id: Uuid) -> Result<Vec<RatingRow>, sqlx::Error> {
    sqlx::query_as::<_, RatingRow>(
        r#"
        SELECT user_id, meal_id, score, created_at
        FROM ratings
        WHERE user_id = ?
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Remove a user's rating for a meal
pub async fn delete_rating(
    pool: &SqlitePool,
    user_id: Uuid,
    meal_id: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM ratings
        WHERE user_id = ? AND meal_id = ?
        "#,
    )
    .bind(user_id)
    .bind(meal_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Post a comment on a meal
pub async fn insert_comment(
    pool: &SqlitePool,
    user_id: Uuid,
    meal_id: String,
    content: String,
) -> Result<CommentRow, sqlx::Error> {
    let row = CommentRow {
        id: Uuid::new_v4(),
        user_id,
        meal_id,
        content,
        created_at: Utc::now(),
    };

    sqlx::query(
        r#"
        INSERT INTO comments (id, user_id, meal_id, content, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(row.id)
    .bind(row.user_id)
    .bind(&row.meal_id)
    .bind(&row.content)
    .bind(row.created_at)
    .execute(pool)
    .await?;

    Ok(row)
}

/// All comments by a user, newest first
pub async fn list_comments(
    pool: &SqlitePool,
    user_id: Uuid,
) -> Result<Vec<CommentRow>, sqlx::Error> {
    sqlx::query_as::<_, CommentRow>(
        r#"
        SELECT id, user_id, meal_id, content, created_at
        FROM comments
        WHERE user_id = ?
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Remove a user's own comment by id
pub async fn delete_comment(
    pool: &SqlitePool,
    user_id: Uuid,
    comment_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM comments
        WHERE user_id = ? AND id = ?
        "#,
    )
    .bind(user_id)
    .bind(comment_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
