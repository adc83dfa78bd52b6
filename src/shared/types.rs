/**
 * Shared Wire Types
 *
 * Request and response bodies exchanged between the client and the backend.
 * Both halves of the crate serialize through these types, so the durable
 * credential context on the client round-trips exactly what the server sent.
 */

use serde::{Deserialize, Serialize};

/// Generic body text for every authentication failure. Part of the wire
/// contract: whether the token was missing, malformed, tampered or expired
/// is never distinguishable from the response.
pub const AUTH_REQUIRED_MESSAGE: &str = "Please log in again";

/// Register request
///
/// Contains the username, email and password for user registration.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RegisterRequest {
    /// User's chosen username (3-30 chars, alphanumeric + underscore)
    pub username: String,
    /// User's email address (normalized to lowercase before storage)
    pub email: String,
    /// User's password (hashed before storage, never persisted in clear)
    pub password: String,
}

/// Login request
///
/// Contains the email and password for user authentication.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LoginRequest {
    /// User's email address
    pub email: String,
    /// User's password (verified against the stored hash)
    pub password: String,
}

/// Auth response
///
/// Returned by register and login handlers. Contains the session token,
/// its expiry, and the user summary for immediate authentication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthResponse {
    /// Signed session token
    pub token: String,
    /// Token expiry as a Unix timestamp (seconds). The client uses this for
    /// its best-effort local expiry check; the server check stays
    /// authoritative.
    pub expires_at: i64,
    /// User information (without sensitive data)
    pub user: UserSummary,
}

/// User summary (without sensitive data)
///
/// Contains user information that is safe to return to clients.
/// Does not include the password hash.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    /// User's unique ID (UUID)
    pub id: String,
    /// User's username
    pub username: String,
    /// User's email address
    pub email: String,
}

/// Uniform error body returned by the backend
///
/// Every error response carries exactly this shape. Authentication failures
/// always carry the same generic message regardless of the internal reason.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorBody {
    /// Human-readable error message
    pub message: String,
}

/// A recipe saved to a user's collection
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SavedRecipe {
    /// Record ID (UUID)
    pub id: String,
    /// Third-party provider meal ID
    pub meal_id: String,
    /// Meal display name
    pub meal_name: String,
    /// Meal thumbnail URL
    pub meal_thumb: String,
    /// When the recipe was saved
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Save-recipe request body
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SaveRecipeRequest {
    pub meal_id: String,
    pub meal_name: String,
    pub meal_thumb: String,
}

/// A user's rating of a recipe
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Rating {
    /// Third-party provider meal ID
    pub meal_id: String,
    /// Score, 1 to 5
    pub score: i32,
    /// When the rating was last set
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Rate-recipe request body
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RateRequest {
    pub meal_id: String,
    /// Score, 1 to 5
    pub score: i32,
}

/// A user's comment on a recipe
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Comment {
    /// Comment ID (UUID)
    pub id: String,
    /// Third-party provider meal ID
    pub meal_id: String,
    /// Comment text
    pub content: String,
    /// When the comment was posted
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Comment request body
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CommentRequest {
    pub meal_id: String,
    pub content: String,
}
