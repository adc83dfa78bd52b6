/**
 * Access Guard Middleware
 *
 * This middleware protects routes that require an authenticated identity.
 * It extracts the bearer credential from the Authorization header, verifies
 * it with the token codec, and attaches the resolved identity to the
 * request for downstream handlers.
 *
 * The guard itself is a pure gate: no database access and no side effects.
 * Rejections short-circuit before any handler logic runs, and every
 * rejection reason (missing header, malformed token, bad signature,
 * expired) collapses to the same generic 401 response. The internal reason
 * is logged server-side only.
 */

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::backend::auth::tokens::TokenCodec;
use crate::backend::error::ApiError;

/// Authenticated identity resolved from a verified token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
}

/// Authentication middleware
///
/// 1. Extracts the bearer token from the Authorization header
/// 2. Verifies signature and expiry via the token codec
/// 3. Attaches `AuthenticatedUser` to request extensions
///
/// Returns the generic 401 response if any step fails.
pub async fn require_auth(
    State(codec): State<TokenCodec>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::debug!("rejecting request: missing Authorization header");
            ApiError::Authentication
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::debug!("rejecting request: Authorization header is not a bearer credential");
        ApiError::Authentication
    })?;

    let claims = codec.verify(token).map_err(|reason| {
        // Internal reason only; the response body never distinguishes.
        tracing::debug!("rejecting request: {reason}");
        ApiError::Authentication
    })?;

    let user_id = claims.subject().map_err(|reason| {
        tracing::debug!("rejecting request: {reason}");
        ApiError::Authentication
    })?;

    request.extensions_mut().insert(AuthenticatedUser {
        user_id,
        email: claims.email,
    });

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
///
/// Used as a handler parameter on guarded routes. Rejects with the generic
/// 401 if the guard did not run for this route, so a mis-wired router can
/// never expose a handler unauthenticated.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser missing from request extensions");
                ApiError::Authentication
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::{middleware, routing::get, Router};
    use axum_test::TestServer;

    use crate::backend::auth::tokens::TokenCodec;
    use crate::backend::server::config::memory_pool;
    use crate::backend::server::state::AppState;

    async fn whoami(AuthUser(user): AuthUser) -> String {
        user.user_id.to_string()
    }

    async fn test_server(codec: TokenCodec) -> TestServer {
        let state = AppState::new(memory_pool().await, codec);
        let app = Router::new()
            .route("/protected", get(whoami))
            .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
            .with_state(state);
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_missing_header_rejected() {
        let server = test_server(TokenCodec::new("test-secret", 3600)).await;
        let response = server.get("/protected").await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_non_bearer_header_rejected() {
        let server = test_server(TokenCodec::new("test-secret", 3600)).await;
        let response = server
            .get("/protected")
            .add_header(AUTHORIZATION, "Basic dXNlcjpwYXNz")
            .await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_token_resolves_identity() {
        let codec = TokenCodec::new("test-secret", 3600);
        let user_id = Uuid::new_v4();
        let issued = codec.issue(user_id, "test@example.com").unwrap();

        let server = test_server(codec).await;
        let response = server
            .get("/protected")
            .authorization_bearer(&issued.token)
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.text(), user_id.to_string());
    }

    #[tokio::test]
    async fn test_rejection_reasons_are_indistinguishable() {
        let codec = TokenCodec::new("test-secret", 3600);
        let user_id = Uuid::new_v4();

        let expired = codec.issue_with_ttl(user_id, "test@example.com", -1).unwrap();

        let valid = codec.issue(user_id, "test@example.com").unwrap();
        let mut parts: Vec<String> = valid.token.split('.').map(String::from).collect();
        let sig = parts[2].clone();
        let flipped = if sig.starts_with('A') { "B" } else { "A" };
        parts[2] = format!("{}{}", flipped, &sig[1..]);
        let tampered = parts.join(".");

        let server = test_server(codec).await;

        let expired_response = server
            .get("/protected")
            .authorization_bearer(&expired.token)
            .await;
        let tampered_response = server
            .get("/protected")
            .authorization_bearer(&tampered)
            .await;

        assert_eq!(expired_response.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(tampered_response.status_code(), StatusCode::UNAUTHORIZED);
        // Identical externally: same status, same body.
        assert_eq!(expired_response.text(), tampered_response.text());
    }
}
