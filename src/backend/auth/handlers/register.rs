/**
 * Register Handler
 *
 * This module implements user registration for POST /api/auth/register.
 *
 * # Registration Process
 *
 * 1. Validate username, email and password
 * 2. Normalize the email (trim, lowercase)
 * 3. Check that email and username are not taken
 * 4. Hash the password with bcrypt
 * 5. Create the user and issue a session token
 *
 * # Security
 *
 * - Passwords are hashed with bcrypt at DEFAULT_COST and never returned
 * - The issued token authenticates the new user immediately
 */

use axum::{extract::State, http::StatusCode, response::Json};
use bcrypt::{hash, DEFAULT_COST};

use crate::backend::auth::users::{create_user, find_by_email, find_by_username};
use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;
use crate::shared::{AuthResponse, RegisterRequest};

/// Validate username format
///
/// Usernames must be:
/// - 3-30 characters long
/// - Contain only alphanumeric characters and underscores
/// - Start with a letter
fn is_valid_username(username: &str) -> bool {
    if username.len() < 3 || username.len() > 30 {
        return false;
    }

    let mut chars = username.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Normalize an email address for storage and lookup
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Register handler
///
/// # Returns
///
/// `201 Created` with `{token, expires_at, user}` on success
///
/// # Errors
///
/// * `400 Bad Request` - validation failure, with the offending field named
/// * `409 Conflict` - email or username already registered
/// * `500 Internal Server Error` - hashing, persistence or signing failure
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    tracing::info!("Register request for username: {}", request.username);

    if !is_valid_username(&request.username) {
        return Err(ApiError::validation(
            "username",
            "must be 3-30 characters, start with a letter, and contain only letters, numbers, and underscores",
        ));
    }

    let email = normalize_email(&request.email);
    if !email.contains('@') {
        return Err(ApiError::validation("email", "must be a valid email address"));
    }

    if request.password.len() < 8 {
        return Err(ApiError::validation(
            "password",
            "must be at least 8 characters",
        ));
    }

    if find_by_email(&state.db, &email).await?.is_some() {
        return Err(ApiError::Conflict("Email already registered".to_string()));
    }

    if find_by_username(&state.db, &request.username).await?.is_some() {
        return Err(ApiError::Conflict("Username already taken".to_string()));
    }

    let password_hash = hash(&request.password, DEFAULT_COST)
        .map_err(|e| ApiError::Internal(format!("password hashing failed: {e}")))?;

    let user = create_user(&state.db, request.username, email, password_hash).await?;

    let issued = state
        .codec
        .issue(user.id, &user.email)
        .map_err(|e| ApiError::Internal(format!("token signing failed: {e}")))?;

    tracing::info!("User created: {} ({})", user.username, user.email);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token: issued.token,
            expires_at: issued.expires_at,
            user: user.summary(),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::tokens::TokenCodec;
    use crate::backend::server::config::{init_schema, memory_pool};

    async fn test_state() -> AppState {
        let pool = memory_pool().await;
        init_schema(&pool).await.unwrap();
        AppState::new(pool, TokenCodec::new("test-secret", 3600))
    }

    fn request(username: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let state = test_state().await;
        let result = register(
            State(state.clone()),
            Json(request("alice", "Alice@Example.com", "password123")),
        )
        .await;

        let (status, response) = result.unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert!(!response.token.is_empty());
        // Email is stored normalized.
        assert_eq!(response.user.email, "alice@example.com");

        // The issued token verifies back to the new user's id.
        let claims = state.codec.verify(&response.token).unwrap();
        assert_eq!(claims.subject().unwrap().to_string(), response.user.id);
    }

    #[tokio::test]
    async fn test_register_invalid_email() {
        let state = test_state().await;
        let result = register(
            State(state),
            Json(request("alice", "not-an-email", "password123")),
        )
        .await;
        assert!(matches!(result.unwrap_err(), ApiError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_register_short_password() {
        let state = test_state().await;
        let result = register(
            State(state),
            Json(request("alice", "alice@example.com", "short")),
        )
        .await;
        assert!(matches!(result.unwrap_err(), ApiError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_register_bad_username() {
        let state = test_state().await;
        let result = register(
            State(state),
            Json(request("1alice", "alice@example.com", "password123")),
        )
        .await;
        assert!(matches!(result.unwrap_err(), ApiError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let state = test_state().await;
        register(
            State(state.clone()),
            Json(request("alice", "alice@example.com", "password123")),
        )
        .await
        .unwrap();

        let result = register(
            State(state),
            Json(request("alice2", "ALICE@example.com", "password123")),
        )
        .await;
        assert!(matches!(result.unwrap_err(), ApiError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let state = test_state().await;
        register(
            State(state.clone()),
            Json(request("alice", "alice@example.com", "password123")),
        )
        .await
        .unwrap();

        let result = register(
            State(state),
            Json(request("alice", "other@example.com", "password123")),
        )
        .await;
        assert!(matches!(result.unwrap_err(), ApiError::Conflict(_)));
    }
}
