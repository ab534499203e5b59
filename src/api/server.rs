//! HTTP server

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::auth::{login_required, CredentialStore, SessionManager};
use crate::blog::PostStore;
use crate::config::Config;
use crate::db;
use crate::error::Result;
use crate::ui::{self, Templates};

use super::routes;

/// Application state shared across handlers
pub struct AppState {
    pub users: CredentialStore,
    pub posts: PostStore,
    pub sessions: SessionManager,
    pub templates: Templates,
}

impl AppState {
    pub fn new(config: &Config, pool: SqlitePool) -> Result<Self> {
        Ok(Self {
            users: CredentialStore::with_cost(pool.clone(), config.auth.bcrypt_cost),
            posts: PostStore::new(pool),
            sessions: SessionManager::from_config(&config.auth),
            templates: Templates::new()?,
        })
    }
}

pub type SharedState = Arc<AppState>;

/// Run the HTTP server
pub async fn run_server(config: Config) -> Result<()> {
    if config.auth.uses_dev_secret() {
        tracing::warn!("Session cookies are signed with the development secret key");
    }

    let pool = db::connect(&config.database).await?;
    db::init_schema(&pool).await?;

    let state = Arc::new(AppState::new(&config, pool)?);
    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the router with all routes
pub fn create_router(state: SharedState) -> Router {
    let protected = Router::new()
        .route("/create", get(ui::create_form).post(ui::create_post))
        .route("/{id}/update", get(ui::update_form).post(ui::update_post))
        .route("/{id}/delete", post(ui::delete_post))
        .route_layer(middleware::from_fn_with_state(state.clone(), login_required));

    Router::new()
        .route("/", get(ui::index))
        .route("/setup", get(routes::setup))
        .route(
            "/auth/register",
            get(routes::register_form).post(routes::register),
        )
        .route("/auth/login", get(routes::login_form).post(routes::login))
        .route("/auth/logout", get(routes::logout))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
