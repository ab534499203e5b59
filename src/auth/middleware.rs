//! Authentication middleware and extractors

use axum::{
    extract::{FromRequestParts, Request},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::api::server::SharedState;
use crate::auth::guard::{guard, Guarded, LOGIN_PATH};
use crate::auth::models::User;
use crate::auth::session::SessionToken;
use crate::error::{Error, Result};

/// The logged-in user for this request, if any
///
/// Resolved at most once per request and cached in the request extensions.
#[derive(Debug, Clone, Default)]
pub struct CurrentUser(pub Option<User>);

impl CurrentUser {
    pub fn user(&self) -> Option<&User> {
        self.0.as_ref()
    }
}

/// Extract the session token from a request
///
/// An `Authorization: Bearer` header wins over the session cookie.
pub fn extract_token(headers: &HeaderMap, cookie_name: &str) -> SessionToken {
    if let Some(token) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
    {
        return SessionToken::from_raw(token);
    }

    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(|v| SessionToken::from_cookie_header(v, cookie_name))
        .unwrap_or_default()
}

/// Load the user named by the request's session token
pub async fn load_current_user(headers: &HeaderMap, state: &SharedState) -> Result<CurrentUser> {
    let token = extract_token(headers, state.sessions.cookie_name());
    let Some(user_id) = state.sessions.resolve(&token) else {
        return Ok(CurrentUser(None));
    };

    // A valid token may still name a user that is gone
    Ok(CurrentUser(state.users.get(user_id).await?))
}

impl FromRequestParts<SharedState> for CurrentUser {
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> std::result::Result<Self, Self::Rejection> {
        if let Some(cached) = parts.extensions.get::<CurrentUser>() {
            return Ok(cached.clone());
        }

        let current = load_current_user(&parts.headers, state).await?;
        parts.extensions.insert(current.clone());
        Ok(current)
    }
}

/// Extractor for handlers that need a logged-in user
///
/// Anonymous requests are redirected to the login page.
pub struct RequireUser(pub User);

impl FromRequestParts<SharedState> for RequireUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> std::result::Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        user.map(RequireUser)
            .ok_or_else(|| Redirect::to(LOGIN_PATH).into_response())
    }
}

/// Middleware for requiring authentication
pub async fn login_required(current: CurrentUser, req: Request, next: Next) -> Response {
    match guard(current.user(), move |_| next.run(req)) {
        Guarded::Allowed(response) => response.await,
        Guarded::RedirectToLogin => {
            tracing::debug!("Anonymous request redirected to {}", LOGIN_PATH);
            Redirect::to(LOGIN_PATH).into_response()
        }
    }
}
