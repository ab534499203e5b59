//! Account route handlers

use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use minijinja::context;

use super::server::SharedState;
use crate::auth::{extract_token, CredentialsForm, CurrentUser, LOGIN_PATH};
use crate::error::Result;
use crate::ui::render;

/// Liveness page
pub async fn setup() -> &'static str {
    "Hello you have not broken your page yet"
}

pub async fn register_form(
    State(state): State<SharedState>,
    current: CurrentUser,
) -> Result<Html<String>> {
    render(
        &state,
        "auth/register.html",
        context! { user => current.0, username => "" },
    )
}

pub async fn register(
    State(state): State<SharedState>,
    current: CurrentUser,
    Form(form): Form<CredentialsForm>,
) -> Result<Response> {
    match state.users.register(&form.username, &form.password).await {
        Ok(_) => Ok(Redirect::to(LOGIN_PATH).into_response()),
        Err(e) if e.is_user_facing() => {
            let page = render(
                &state,
                "auth/register.html",
                context! { user => current.0, username => form.username, error => e.to_string() },
            )?;
            Ok(page.into_response())
        }
        Err(e) => Err(e),
    }
}

pub async fn login_form(
    State(state): State<SharedState>,
    current: CurrentUser,
) -> Result<Html<String>> {
    render(
        &state,
        "auth/login.html",
        context! { user => current.0, username => "" },
    )
}

pub async fn login(
    State(state): State<SharedState>,
    current: CurrentUser,
    Form(form): Form<CredentialsForm>,
) -> Result<Response> {
    match state.users.verify(&form.username, &form.password).await {
        Ok(user) => {
            let token = state.sessions.start_session(user.id)?;
            tracing::info!("User {} logged in", user.username);
            Ok((
                [(header::SET_COOKIE, state.sessions.cookie(&token))],
                Redirect::to("/"),
            )
                .into_response())
        }
        Err(e) if e.is_user_facing() => {
            let page = render(
                &state,
                "auth/login.html",
                context! { user => current.0, username => form.username, error => e.to_string() },
            )?;
            Ok(page.into_response())
        }
        Err(e) => Err(e),
    }
}

pub async fn logout(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let mut token = extract_token(&headers, state.sessions.cookie_name());
    if let Some(user_id) = state.sessions.resolve(&token) {
        tracing::info!("User {} logged out", user_id);
    }
    state.sessions.end_session(&mut token);

    (
        [(header::SET_COOKIE, state.sessions.removal_cookie())],
        Redirect::to("/"),
    )
        .into_response()
}
