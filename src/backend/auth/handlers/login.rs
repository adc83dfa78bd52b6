/**
 * Login Handler
 *
 * This module implements user authentication for POST /api/auth/login.
 *
 * # Authentication Process
 *
 * 1. Look up user by normalized email
 * 2. Verify password with bcrypt
 * 3. Issue a session token
 *
 * # Security
 *
 * - Unknown account and wrong password return the identical 401 response,
 *   preventing user enumeration
 * - Password verification uses bcrypt's constant-time comparison
 * - Passwords are never logged or returned
 */

use axum::{extract::State, response::Json};
use bcrypt::verify;

use crate::backend::auth::handlers::register::normalize_email;
use crate::backend::auth::users::find_by_email;
use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;
use crate::shared::{AuthResponse, LoginRequest};

/// Login handler
///
/// # Returns
///
/// `200 OK` with `{token, expires_at, user}` on success
///
/// # Errors
///
/// * `401 Unauthorized` - unknown email or wrong password (same response)
/// * `500 Internal Server Error` - persistence or signing failure
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let email = normalize_email(&request.email);
    tracing::info!("Login request for: {email}");

    let user = find_by_email(&state.db, &email)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    let valid = verify(&request.password, &user.password_hash)
        .map_err(|e| ApiError::Internal(format!("password verification failed: {e}")))?;

    if !valid {
        tracing::debug!("wrong password for: {email}");
        return Err(ApiError::InvalidCredentials);
    }

    let issued = state
        .codec
        .issue(user.id, &user.email)
        .map_err(|e| ApiError::Internal(format!("token signing failed: {e}")))?;

    tracing::info!("User logged in: {} ({})", user.username, user.email);

    Ok(Json(AuthResponse {
        token: issued.token,
        expires_at: issued.expires_at,
        user: user.summary(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    use crate::backend::auth::handlers::register::register;
    use crate::backend::auth::tokens::TokenCodec;
    use crate::backend::server::config::{init_schema, memory_pool};
    use crate::shared::RegisterRequest;

    async fn state_with_user() -> AppState {
        let pool = memory_pool().await;
        init_schema(&pool).await.unwrap();
        let state = AppState::new(pool, TokenCodec::new("test-secret", 3600));
        register(
            State(state.clone()),
            Json(RegisterRequest {
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                password: "password123".to_string(),
            }),
        )
        .await
        .unwrap();
        state
    }

    fn request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_success() {
        let state = state_with_user().await;
        let response = login(
            State(state.clone()),
            Json(request("alice@example.com", "password123")),
        )
        .await
        .unwrap();

        assert!(!response.token.is_empty());
        let claims = state.codec.verify(&response.token).unwrap();
        assert_eq!(claims.subject().unwrap().to_string(), response.user.id);
    }

    #[tokio::test]
    async fn test_login_email_is_normalized() {
        let state = state_with_user().await;
        let result = login(
            State(state),
            Json(request("  ALICE@example.com ", "password123")),
        )
        .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let state = state_with_user().await;

        let wrong_password = login(
            State(state.clone()),
            Json(request("alice@example.com", "wrongpassword")),
        )
        .await
        .unwrap_err();
        let unknown_user = login(
            State(state),
            Json(request("nobody@example.com", "password123")),
        )
        .await
        .unwrap_err();

        assert_eq!(wrong_password.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(unknown_user.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_password.client_message(), unknown_user.client_message());
    }
}
