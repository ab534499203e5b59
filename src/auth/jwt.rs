//! JWT encoding of session cookies

use crate::auth::models::UserId;
use crate::error::Result;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at
    pub iat: i64,
    /// Expiration time
    pub exp: i64,
}

impl Claims {
    /// Create claims for a user, valid for `ttl`
    pub fn for_user(user_id: UserId, ttl: Duration) -> Self {
        let now = chrono::Utc::now().timestamp();
        let ttl = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        Self {
            sub: user_id.to_string(),
            iat: now,
            exp: now.saturating_add(ttl),
        }
    }

    /// The user id carried in `sub`, if it parses
    pub fn user_id(&self) -> Option<UserId> {
        self.sub.parse().ok()
    }

    /// Check if token is expired
    pub fn is_expired(&self) -> bool {
        chrono::Utc::now().timestamp() > self.exp
    }
}

/// HMAC keys for signing and checking tokens
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenKeys {
    pub fn from_secret(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

/// Create a signed token from claims
pub fn create_token(keys: &TokenKeys, claims: &Claims) -> Result<String> {
    Ok(encode(&Header::new(Algorithm::HS256), claims, &keys.encoding)?)
}

/// Validate and decode a token
pub fn validate_token(keys: &TokenKeys, token: &str) -> Result<Claims> {
    let data = decode::<Claims>(token, &keys.decoding, &keys.validation)?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> TokenKeys {
        TokenKeys::from_secret(b"test-secret")
    }

    #[test]
    fn test_create_and_validate_token() {
        let claims = Claims::for_user(7, Duration::from_secs(3600));
        let token = create_token(&keys(), &claims).expect("Failed to create token");
        let decoded = validate_token(&keys(), &token).expect("Failed to validate token");

        assert_eq!(decoded.sub, "7");
        assert_eq!(decoded.user_id(), Some(7));
        assert!(!decoded.is_expired());
    }

    #[test]
    fn test_invalid_token() {
        assert!(validate_token(&keys(), "invalid.token.here").is_err());
        assert!(validate_token(&keys(), "").is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let claims = Claims::for_user(1, Duration::from_secs(3600));
        let token = create_token(&keys(), &claims).unwrap();
        let other = TokenKeys::from_secret(b"another-secret");
        assert!(validate_token(&other, &token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: "1".to_string(),
            iat: now - 120,
            exp: now - 60,
        };
        assert!(claims.is_expired());
        let token = create_token(&keys(), &claims).unwrap();
        assert!(validate_token(&keys(), &token).is_err());
    }

    #[test]
    fn test_non_numeric_subject() {
        let claims = Claims {
            sub: "alice".to_string(),
            iat: 0,
            exp: 9999999999,
        };
        assert_eq!(claims.user_id(), None);
    }
}
