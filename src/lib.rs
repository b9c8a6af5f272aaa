use axum::{
    extract::{DefaultBodyLimit, State},
    http::{HeaderValue, Method, StatusCode},
    middleware::from_fn_with_state,
    response::{IntoResponse, Json},
    routing::{delete, get, post},
    Router,
};
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod state;

#[cfg(test)]
pub mod testing;

use crate::config::{AppConfig, Environment};
use crate::middleware::require_auth;
use crate::state::AppState;

/// Builds the full router over an already constructed state.
pub fn app(state: AppState) -> Router {
    let body_limit = state.config.api.max_request_size_bytes;
    let cors = cors_layer(&state.config);

    let mut router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_public_routes())
        // Protected
        .merge(protected_routes(state.clone()))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = cors {
        router = router.layer(cors);
    }

    router.with_state(state)
}

fn auth_public_routes() -> Router<AppState> {
    use handlers::public::auth;

    Router::new()
        .route("/auth/register", post(auth::register_post))
        .route("/auth/login", post(auth::login_post))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(space_routes())
        .merge(user_routes())
        .merge(academy_routes())
        .merge(admin_routes())
        .route_layer(from_fn_with_state(state, require_auth))
}

fn space_routes() -> Router<AppState> {
    use handlers::protected::space;

    Router::new()
        .route("/space/create-space", post(space::create_space))
        .route("/space/details", get(space::list_spaces))
        .route("/space/:id", delete(space::delete_space))
        .route("/space/:id/details", get(space::space_details))
        .route("/space/:id/get-files", get(space::get_files))
        .route("/space/:id/create-file", post(space::create_file))
        .route("/space/:id/create-folder", post(space::create_folder))
        .route("/space/:id/save-file", post(space::save_file))
}

fn user_routes() -> Router<AppState> {
    use handlers::protected::user;

    Router::new()
        .route("/user/profile", get(user::profile_get))
        .route("/user/update-socials", post(user::update_socials))
}

fn academy_routes() -> Router<AppState> {
    use handlers::protected::academy;

    Router::new()
        .route("/user/academy/dashboard", get(academy::dashboard_get))
        .route("/user/academy/generate", post(academy::generate_post))
        .route("/user/academy/:id/status", get(academy::status_get))
        .route("/user/academy/:id/status/:qid/submit", post(academy::submit_post))
}

fn admin_routes() -> Router<AppState> {
    use handlers::protected::admin;

    Router::new().route("/delete/:name", get(admin::drop_table_get))
}

/// Permissive in development, origin list elsewhere, absent when disabled.
fn cors_layer(config: &AppConfig) -> Option<CorsLayer> {
    if !config.security.enable_cors {
        return None;
    }
    if config.environment == Environment::Development {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers(Any),
    )
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "success": true,
        "data": {
            "name": "Hack4Change API",
            "version": env!("CARGO_PKG_VERSION"),
            "endpoints": {
                "auth": "/auth/register, /auth/login (public)",
                "space": "/space/* (protected)",
                "user": "/user/profile, /user/update-socials (protected)",
                "academy": "/user/academy/* (protected)",
                "admin": "/delete/:name (protected)",
                "health": "/health (public)",
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.gateway.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "Database unavailable",
                    "code": "SERVICE_UNAVAILABLE",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
        }
    }
}
