//! Shared Module
//!
//! Types shared between the client and the backend. Everything here is
//! plain serde data with no side effects, so both halves of the crate can
//! depend on it without pulling in server or client machinery.

pub mod types;

pub use types::{
    AuthResponse, AUTH_REQUIRED_MESSAGE, Comment, CommentRequest, ErrorBody, LoginRequest, RateRequest, Rating,
    RegisterRequest, SaveRecipeRequest, SavedRecipe, UserSummary,
};
