/**
 * Router Configuration
 *
 * This module assembles the Axum router.
 *
 * # Route Layout
 *
 * Routes split into two groups:
 * 1. Public routes: registration and login, reachable without a credential
 * 2. Guarded routes: everything owner-scoped, behind the access guard
 *
 * The guard runs as a `route_layer` on the guarded group, so a rejected
 * credential short-circuits before any handler logic. The client-side
 * route gate is advisory UX only; this server-side layering is the actual
 * security boundary.
 */

use axum::{middleware, routing, Router};
use tower_http::trace::TraceLayer;

use crate::backend::auth::{login, me, register};
use crate::backend::middleware::require_auth;
use crate::backend::recipes::handlers::{
    delete_comment, delete_rating, delete_saved_recipe, list_comments, list_ratings,
    list_saved_recipes, post_comment, rate_recipe, save_recipe,
};
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Routes
///
/// ## Public
/// - `POST /api/auth/register` - User registration
/// - `POST /api/auth/login` - User login
///
/// ## Guarded (require `Authorization: Bearer <token>`)
/// - `GET /api/auth/me` - Current user
/// - `POST|GET /api/saved-recipes`, `DELETE /api/saved-recipes/{meal_id}`
/// - `POST|GET /api/ratings`, `DELETE /api/ratings/{meal_id}`
/// - `POST|GET /api/comments`, `DELETE /api/comments/{id}`
pub fn create_router(app_state: AppState) -> Router {
    let public = Router::new()
        .route("/api/auth/register", routing::post(register))
        .route("/api/auth/login", routing::post(login));

    let guarded = Router::new()
        .route("/api/auth/me", routing::get(me))
        .route(
            "/api/saved-recipes",
            routing::post(save_recipe).get(list_saved_recipes),
        )
        .route("/api/saved-recipes/{meal_id}", routing::delete(delete_saved_recipe))
        .route("/api/ratings", routing::post(rate_recipe).get(list_ratings))
        .route("/api/ratings/{meal_id}", routing::delete(delete_rating))
        .route("/api/comments", routing::post(post_comment).get(list_comments))
        .route("/api/comments/{id}", routing::delete(delete_comment))
        .route_layer(middleware::from_fn_with_state(app_state.clone(), require_auth));

    public
        .merge(guarded)
        .fallback(|| async { (axum::http::StatusCode::NOT_FOUND, "404 Not Found") })
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
