//! Blog page handlers

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use minijinja::context;
use serde::Serialize;

use crate::api::server::{AppState, SharedState};
use crate::auth::{CurrentUser, RequireUser};
use crate::blog::{PostForm, PostId};
use crate::error::{Error, Result};

/// Render a page template into an HTML response body
pub fn render<S: Serialize>(state: &AppState, name: &str, ctx: S) -> Result<Html<String>> {
    Ok(Html(state.templates.render(name, ctx)?))
}

/// Blog index - lists all posts
pub async fn index(State(state): State<SharedState>, current: CurrentUser) -> Result<Html<String>> {
    let posts = state.posts.list().await?;
    render(
        &state,
        "blog/index.html",
        context! { user => current.0, posts => posts },
    )
}

pub async fn create_form(
    State(state): State<SharedState>,
    RequireUser(user): RequireUser,
) -> Result<Html<String>> {
    render(
        &state,
        "blog/create.html",
        context! { user => user, form => PostForm::default() },
    )
}

pub async fn create_post(
    State(state): State<SharedState>,
    RequireUser(user): RequireUser,
    Form(form): Form<PostForm>,
) -> Result<Response> {
    match state.posts.create(user.id, &form.title, &form.body).await {
        Ok(_) => Ok(Redirect::to("/").into_response()),
        Err(Error::Validation(message)) => {
            let page = render(
                &state,
                "blog/create.html",
                context! { user => user, form => form, error => message },
            )?;
            Ok(page.into_response())
        }
        Err(e) => Err(e),
    }
}

pub async fn update_form(
    State(state): State<SharedState>,
    RequireUser(user): RequireUser,
    Path(id): Path<PostId>,
) -> Result<Html<String>> {
    let post = state.posts.get(id, Some(user.id)).await?;
    let form = PostForm {
        title: post.title.clone(),
        body: post.body.clone(),
    };
    render(
        &state,
        "blog/update.html",
        context! { user => user, post => post, form => form },
    )
}

pub async fn update_post(
    State(state): State<SharedState>,
    RequireUser(user): RequireUser,
    Path(id): Path<PostId>,
    Form(form): Form<PostForm>,
) -> Result<Response> {
    match state
        .posts
        .update(id, user.id, &form.title, &form.body)
        .await
    {
        Ok(()) => Ok(Redirect::to("/").into_response()),
        Err(Error::Validation(message)) => {
            let post = state.posts.get(id, Some(user.id)).await?;
            let page = render(
                &state,
                "blog/update.html",
                context! { user => user, post => post, form => form, error => message },
            )?;
            Ok(page.into_response())
        }
        Err(e) => Err(e),
    }
}

pub async fn delete_post(
    State(state): State<SharedState>,
    RequireUser(user): RequireUser,
    Path(id): Path<PostId>,
) -> Result<Redirect> {
    state.posts.delete(id, user.id).await?;
    Ok(Redirect::to("/"))
}
