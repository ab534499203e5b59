//! Session management
//!
//! Sessions live entirely on the client: the cookie holds a signed token
//! naming the user, and the server only checks the signature on each request.

use std::fmt;
use std::time::Duration;

use crate::auth::jwt::{create_token, validate_token, Claims, TokenKeys};
use crate::auth::models::UserId;
use crate::config::AuthConfig;
use crate::error::Result;

/// The session token slot held by one client
///
/// An empty slot means the client has no session (never logged in, or
/// logged out).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionToken(Option<String>);

impl SessionToken {
    /// A slot with no token in it
    pub fn empty() -> Self {
        Self(None)
    }

    /// Wrap a raw token value, as read from a cookie
    pub fn from_raw(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Self(None)
        } else {
            Self(Some(value))
        }
    }

    /// Read the named cookie out of a `Cookie` header value
    pub fn from_cookie_header(header: &str, cookie_name: &str) -> Self {
        parse_cookie(header, cookie_name)
            .map(Self::from_raw)
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    fn clear(&mut self) {
        self.0 = None;
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str().unwrap_or(""))
    }
}

/// Issues and resolves signed session tokens
#[derive(Clone)]
pub struct SessionManager {
    keys: TokenKeys,
    ttl: Duration,
    cookie_name: String,
}

impl SessionManager {
    /// Create a session manager signing with `secret`
    pub fn new(secret: &[u8], ttl: Duration, cookie_name: impl Into<String>) -> Self {
        Self {
            keys: TokenKeys::from_secret(secret),
            ttl,
            cookie_name: cookie_name.into(),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            config.secret_key.as_bytes(),
            config.session_ttl(),
            config.cookie_name.clone(),
        )
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Issue a fresh token bound to `user_id`
    ///
    /// Nothing is recorded server-side. The new token replaces whatever the
    /// client held before.
    pub fn start_session(&self, user_id: UserId) -> Result<SessionToken> {
        let claims = Claims::for_user(user_id, self.ttl);
        let token = create_token(&self.keys, &claims)?;
        Ok(SessionToken::from_raw(token))
    }

    /// Resolve a token to the user id it carries
    ///
    /// Missing, forged, expired and malformed tokens all resolve to `None`.
    pub fn resolve(&self, token: &SessionToken) -> Option<UserId> {
        let raw = token.as_str()?;
        match validate_token(&self.keys, raw) {
            Ok(claims) => claims.user_id(),
            Err(e) => {
                tracing::debug!("Ignoring invalid session token: {}", e);
                None
            }
        }
    }

    /// Clear the client's token
    pub fn end_session(&self, token: &mut SessionToken) {
        token.clear();
    }

    /// `Set-Cookie` value storing `token`
    pub fn cookie(&self, token: &SessionToken) -> String {
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.cookie_name,
            token,
            self.ttl.as_secs()
        )
    }

    /// `Set-Cookie` value that makes the browser drop the session cookie
    pub fn removal_cookie(&self) -> String {
        format!(
            "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
            self.cookie_name
        )
    }
}

/// Parse a specific cookie value from a Cookie header string
pub fn parse_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|part| {
        part.trim()
            .strip_prefix(name)
            .and_then(|value| value.strip_prefix('='))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> SessionManager {
        SessionManager::new(b"test-secret", Duration::from_secs(3600), "blogpad_session")
    }

    #[test]
    fn test_start_and_resolve_session() {
        let manager = manager();
        let token = manager.start_session(7).unwrap();
        assert!(!token.is_empty());
        assert_eq!(manager.resolve(&token), Some(7));
    }

    #[test]
    fn test_end_session() {
        let manager = manager();
        let mut token = manager.start_session(7).unwrap();

        manager.end_session(&mut token);
        assert!(token.is_empty());
        assert_eq!(manager.resolve(&token), None);
        assert_eq!(manager.resolve(&token), None);
    }

    #[test]
    fn test_garbage_resolves_to_anonymous() {
        let manager = manager();
        for raw in ["", "garbage", "a.b.c", "eyJhbGciOiJIUzI1NiJ9..", "🍪"] {
            assert_eq!(manager.resolve(&SessionToken::from_raw(raw)), None);
        }
        assert_eq!(manager.resolve(&SessionToken::empty()), None);
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let other = SessionManager::new(b"other", Duration::from_secs(3600), "blogpad_session");
        let token = other.start_session(1).unwrap();
        assert_eq!(manager().resolve(&token), None);
    }

    #[test]
    fn test_sessions_are_independent() {
        let manager = manager();
        let first = manager.start_session(1).unwrap();
        let second = manager.start_session(2).unwrap();
        assert_ne!(first, second);
        assert_eq!(manager.resolve(&first), Some(1));
        assert_eq!(manager.resolve(&second), Some(2));
    }

    #[test]
    fn test_parse_cookie() {
        assert_eq!(
            parse_cookie("blogpad_session=abc123; other=def", "blogpad_session"),
            Some("abc123")
        );
        assert_eq!(
            parse_cookie("other=def; blogpad_session=xyz", "blogpad_session"),
            Some("xyz")
        );
        assert_eq!(parse_cookie("other=def", "blogpad_session"), None);
        assert_eq!(parse_cookie("", "blogpad_session"), None);
    }

    #[test]
    fn test_token_from_cookie_header() {
        let token = SessionToken::from_cookie_header("blogpad_session=; x=1", "blogpad_session");
        assert!(token.is_empty());

        let token = SessionToken::from_cookie_header("blogpad_session=tok", "blogpad_session");
        assert_eq!(token.as_str(), Some("tok"));
    }

    #[test]
    fn test_cookie_strings() {
        let manager = manager();
        let token = SessionToken::from_raw("tok");
        assert_eq!(
            manager.cookie(&token),
            "blogpad_session=tok; Path=/; HttpOnly; SameSite=Lax; Max-Age=3600"
        );
        assert!(manager.removal_cookie().contains("Max-Age=0"));
    }
}
