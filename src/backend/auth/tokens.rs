/**
 * Token Codec
 *
 * This module issues and verifies the signed session tokens that carry a
 * user's identity on every request. Tokens are self-contained: validity is
 * decided purely from the signed claims and the current time, with no
 * server-side session table. That also means a token cannot be revoked
 * before its natural expiry; logout is client-side credential clearing.
 */

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Default token lifetime: 24 hours
pub const DEFAULT_TTL_SECS: i64 = 24 * 60 * 60;

/// Signed claims carried by a session token
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject: user ID (UUID)
    pub sub: String,
    /// Email of the subject
    pub email: String,
    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,
    /// Issued at time (Unix timestamp, seconds)
    pub iat: i64,
}

impl Claims {
    /// Parse the subject as a user ID
    ///
    /// A token whose subject is not a UUID is treated as malformed even
    /// though its signature checked out.
    pub fn subject(&self) -> Result<Uuid, TokenError> {
        Uuid::parse_str(&self.sub).map_err(|_| TokenError::Malformed)
    }
}

/// Why verification rejected a token
///
/// The reason is for server-side logging only. At the HTTP boundary every
/// variant collapses to the same generic unauthorized response.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// Not a structurally valid token
    #[error("token is malformed")]
    Malformed,
    /// Structure is fine but the signature does not match
    #[error("token signature is invalid")]
    BadSignature,
    /// Signature is fine but the token is past its expiry
    #[error("token has expired")]
    Expired,
}

/// A freshly issued token together with its expiry
///
/// The expiry is returned alongside the opaque token so auth responses can
/// tell the client when its credential lapses without the client ever
/// inspecting the token itself.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: i64,
}

/// Issues and verifies session tokens with a server-held secret
///
/// Construction derives the HMAC keys once; issue and verify are pure
/// computations after that. Verification is deterministic for a stable
/// secret, so it survives server restarts.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl TokenCodec {
    /// Create a codec from the signing secret and token lifetime
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_ref()),
            decoding: DecodingKey::from_secret(secret.as_ref()),
            ttl_secs,
        }
    }

    /// Issue a signed token for a user
    ///
    /// # Arguments
    /// * `user_id` - User ID (UUID), becomes the token subject
    /// * `email` - User email
    ///
    /// # Returns
    /// The encoded token and its expiry timestamp
    pub fn issue(&self, user_id: Uuid, email: &str) -> Result<IssuedToken, jsonwebtoken::errors::Error> {
        self.issue_with_ttl(user_id, email, self.ttl_secs)
    }

    /// Issue a token with an explicit lifetime
    ///
    /// A non-positive `ttl_secs` produces an already-expired token, which
    /// tests use to exercise the expiry path.
    pub fn issue_with_ttl(
        &self,
        user_id: Uuid,
        email: &str,
        ttl_secs: i64,
    ) -> Result<IssuedToken, jsonwebtoken::errors::Error> {
        let now = Utc::now().timestamp();
        let expires_at = now + ttl_secs;

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            exp: expires_at,
            iat: now,
        };

        let token = encode(&Header::default(), &claims, &self.encoding)?;
        Ok(IssuedToken { token, expires_at })
    }

    /// Verify a token and decode its claims
    ///
    /// Checks structure, signature and expiry, in that order of reporting.
    /// Expiry has zero leeway: a token one second past `exp` is rejected.
    /// Signature comparison is delegated to the HMAC primitive, which
    /// compares in constant time.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        match decode::<Claims>(token, &self.decoding, &validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => Err(match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                _ => TokenError::Malformed,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> TokenCodec {
        TokenCodec::new("test-secret", DEFAULT_TTL_SECS)
    }

    #[test]
    fn test_issue_and_verify() {
        let user_id = Uuid::new_v4();
        let issued = codec().issue(user_id, "test@example.com").unwrap();
        assert!(!issued.token.is_empty());

        let claims = codec().verify(&issued.token).unwrap();
        assert_eq!(claims.subject().unwrap(), user_id);
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.exp, issued.expires_at);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_verify_is_deterministic_across_codecs() {
        // Same secret, fresh codec: simulates a server restart.
        let user_id = Uuid::new_v4();
        let issued = codec().issue(user_id, "test@example.com").unwrap();

        let restarted = TokenCodec::new("test-secret", DEFAULT_TTL_SECS);
        assert!(restarted.verify(&issued.token).is_ok());
    }

    #[test]
    fn test_expired_token_rejected() {
        let user_id = Uuid::new_v4();
        let issued = codec()
            .issue_with_ttl(user_id, "test@example.com", -1)
            .unwrap();

        assert_eq!(codec().verify(&issued.token), Err(TokenError::Expired));
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let user_id = Uuid::new_v4();
        let issued = codec().issue(user_id, "test@example.com").unwrap();

        // Flip a character in the signature segment.
        let mut parts: Vec<String> = issued.token.split('.').map(String::from).collect();
        assert_eq!(parts.len(), 3);
        let sig = parts[2].clone();
        let flipped = if sig.starts_with('A') { "B" } else { "A" };
        parts[2] = format!("{}{}", flipped, &sig[1..]);
        let tampered = parts.join(".");

        assert_eq!(codec().verify(&tampered), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let user_id = Uuid::new_v4();
        let issued = codec().issue(user_id, "test@example.com").unwrap();

        let other = TokenCodec::new("other-secret", DEFAULT_TTL_SECS);
        assert_eq!(other.verify(&issued.token), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_garbage_is_malformed() {
        assert_eq!(codec().verify("not.a.token"), Err(TokenError::Malformed));
        assert_eq!(codec().verify(""), Err(TokenError::Malformed));
    }

    #[test]
    fn test_non_uuid_subject_is_malformed() {
        let claims = Claims {
            sub: "not-a-uuid".to_string(),
            email: "test@example.com".to_string(),
            exp: Utc::now().timestamp() + 60,
            iat: Utc::now().timestamp(),
        };
        assert_eq!(claims.subject(), Err(TokenError::Malformed));
    }
}
