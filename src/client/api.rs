/**
 * Request Pipeline
 *
 * HTTP client functions wrapping every outbound call in a uniform
 * `{data, error}` envelope. Exactly one of the two is populated and no
 * failure ever propagates past this boundary as a panic or raw error.
 *
 * When the credential store holds a token it is attached as a bearer
 * credential. A 401 response clears the credential store (guarded by the
 * generation snapshot taken before the request, so a stale 401 cannot
 * evict a newer session) before the error is surfaced; every view reacts
 * to credential loss consistently without re-implementing logout-on-401.
 *
 * Each call makes exactly one outbound attempt. No automatic retry:
 * replaying a credentialed mutation would risk duplicate side effects.
 */

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::shared::AUTH_REQUIRED_MESSAGE;
use crate::client::config::Config;
use crate::client::session::{Credentials, SessionStore};
use crate::shared::{
    AuthResponse, Comment, CommentRequest, ErrorBody, LoginRequest, RateRequest, Rating,
    RegisterRequest, SaveRecipeRequest, SavedRecipe,
};

/// API endpoint paths
pub mod endpoints {
    pub const REGISTER: &str = "/api/auth/register";
    pub const LOGIN: &str = "/api/auth/login";
    pub const ME: &str = "/api/auth/me";
    pub const SAVED_RECIPES: &str = "/api/saved-recipes";
    pub const RATINGS: &str = "/api/ratings";
    pub const COMMENTS: &str = "/api/comments";
}

/// Request timeout; generous for a hobby backend, short enough that the UI
/// is never stuck on a dead connection.
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(8);

/// Uniform result envelope for every API call
///
/// Exactly one of `data` and `error` is populated.
#[derive(Debug, Clone)]
pub struct ApiEnvelope<T> {
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    fn err(error: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(error.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.data.is_some()
    }
}

/// HTTP client for the mealbook backend
///
/// Cheap to clone; all clones share the session store.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: Config,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(config: Config, session: SessionStore) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http,
            config,
            session,
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// One outbound attempt; returns the response or the final error string
    ///
    /// Handles bearer injection and the 401 interceptor. Callers only see
    /// responses with non-401 status.
    async fn dispatch(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<serde_json::Value>,
    ) -> Result<reqwest::Response, String> {
        // Snapshot before sending: if the session changes while this
        // request is in flight, a 401 for it is stale.
        let generation = self.session.generation();
        let token = self.session.token();

        let mut request = self.http.request(method, self.config.api_url(endpoint));
        if let Some(token) = &token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!("request to {endpoint} failed: {e}");
            format!("Failed to reach server: {e}")
        })?;

        if response.status() == StatusCode::UNAUTHORIZED {
            // Credential loss: evict before surfacing the error so every
            // consumer observes the logged-out state together with it.
            self.session.clear_if_current(generation);
            let message = read_error_message(response)
                .await
                .unwrap_or_else(|| AUTH_REQUIRED_MESSAGE.to_string());
            return Err(message);
        }

        Ok(response)
    }

    async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<serde_json::Value>,
    ) -> ApiEnvelope<T> {
        let response = match self.dispatch(method, endpoint, body).await {
            Ok(response) => response,
            Err(error) => return ApiEnvelope::err(error),
        };

        let status = response.status();
        if !status.is_success() {
            let message = read_error_message(response)
                .await
                .unwrap_or_else(|| format!("Error: {status}"));
            return ApiEnvelope::err(message);
        }

        match response.json::<T>().await {
            Ok(data) => ApiEnvelope::ok(data),
            Err(e) => ApiEnvelope::err(format!("Failed to parse response: {e}")),
        }
    }

    /// GET returning a JSON body
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> ApiEnvelope<T> {
        self.request_json(Method::GET, endpoint, None).await
    }

    /// POST with a JSON body, returning a JSON body
    pub async fn post<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &impl Serialize,
    ) -> ApiEnvelope<T> {
        match serde_json::to_value(body) {
            Ok(value) => self.request_json(Method::POST, endpoint, Some(value)).await,
            Err(e) => ApiEnvelope::err(format!("Failed to encode request: {e}")),
        }
    }

    /// PUT with a JSON body, returning a JSON body
    pub async fn put<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &impl Serialize,
    ) -> ApiEnvelope<T> {
        match serde_json::to_value(body) {
            Ok(value) => self.request_json(Method::PUT, endpoint, Some(value)).await,
            Err(e) => ApiEnvelope::err(format!("Failed to encode request: {e}")),
        }
    }

    /// DELETE; success carries no body
    pub async fn delete(&self, endpoint: &str) -> ApiEnvelope<()> {
        let response = match self.dispatch(Method::DELETE, endpoint, None).await {
            Ok(response) => response,
            Err(error) => return ApiEnvelope::err(error),
        };

        let status = response.status();
        if !status.is_success() {
            let message = read_error_message(response)
                .await
                .unwrap_or_else(|| format!("Error: {status}"));
            return ApiEnvelope::err(message);
        }

        ApiEnvelope::ok(())
    }

    /// Register a new account
    ///
    /// On success the returned credential is installed in the session
    /// store before the envelope is returned.
    pub async fn register(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> ApiEnvelope<AuthResponse> {
        let request = RegisterRequest {
            username,
            email,
            password,
        };
        let envelope: ApiEnvelope<AuthResponse> = self.post(endpoints::REGISTER, &request).await;
        self.install_credentials(&envelope);
        envelope
    }

    /// Log in with email and password
    pub async fn login(&self, email: String, password: String) -> ApiEnvelope<AuthResponse> {
        let request = LoginRequest { email, password };
        let envelope: ApiEnvelope<AuthResponse> = self.post(endpoints::LOGIN, &request).await;
        self.install_credentials(&envelope);
        envelope
    }

    /// Log out: client-side credential clearing only
    ///
    /// The token itself stays valid until its natural expiry; there is no
    /// server-side revocation.
    pub fn logout(&self) {
        self.session.clear();
    }

    /// The caller's saved recipes
    pub async fn saved_recipes(&self) -> ApiEnvelope<Vec<SavedRecipe>> {
        self.get(endpoints::SAVED_RECIPES).await
    }

    /// Save a recipe to the caller's collection
    pub async fn save_recipe(&self, request: &SaveRecipeRequest) -> ApiEnvelope<SavedRecipe> {
        self.post(endpoints::SAVED_RECIPES, request).await
    }

    /// Remove a recipe from the caller's collection
    pub async fn delete_saved_recipe(&self, meal_id: &str) -> ApiEnvelope<()> {
        self.delete(&format!("{}/{}", endpoints::SAVED_RECIPES, meal_id)).await
    }

    /// The caller's ratings
    pub async fn ratings(&self) -> ApiEnvelope<Vec<Rating>> {
        self.get(endpoints::RATINGS).await
    }

    /// Rate a recipe
    pub async fn rate_recipe(&self, request: &RateRequest) -> ApiEnvelope<Rating> {
        self.post(endpoints::RATINGS, request).await
    }

    /// The caller's comments
    pub async fn comments(&self) -> ApiEnvelope<Vec<Comment>> {
        self.get(endpoints::COMMENTS).await
    }

    /// Comment on a recipe
    pub async fn post_comment(&self, request: &CommentRequest) -> ApiEnvelope<Comment> {
        self.post(endpoints::COMMENTS, request).await
    }

    fn install_credentials(&self, envelope: &ApiEnvelope<AuthResponse>) {
        if let Some(auth) = &envelope.data {
            self.session.set(Credentials {
                token: auth.token.clone(),
                expires_at: auth.expires_at,
                user: auth.user.clone(),
            });
        }
    }
}

/// Extract the server's `{"message"}` body, if there is one
async fn read_error_message(response: reqwest::Response) -> Option<String> {
    response.json::<ErrorBody>().await.ok().map(|body| body.message)
}
