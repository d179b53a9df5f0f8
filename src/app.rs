use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    middleware::from_fn,
    response::{IntoResponse, Json},
    routing::{delete, get, post, put},
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config;
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes())
        // Protected API
        .merge(auth_routes())
        .merge(post_routes())
        .merge(profile_routes())
        // Global middleware
        .layer(cors_layer());

    let router = if config::config().server.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    };

    router.with_state(state)
}

fn cors_layer() -> CorsLayer {
    let origins = &config::config().security.cors_origins;
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users", post(public::register))
        .route("/api/auth", post(public::login))
        .route("/api/profile", get(public::profile_list))
        .route("/api/profile/user/:user_id", get(public::profile_by_user))
        .route("/api/profile/github/:username", get(public::github_repos))
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth", get(protected::current_user))
        .route_layer(from_fn(jwt_auth_middleware))
}

fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/api/posts", get(protected::post_list).post(protected::post_create))
        .route("/api/posts/:id", get(protected::post_get).delete(protected::post_delete))
        .route("/api/posts/like/:id", put(protected::post_like))
        .route("/api/posts/unlike/:id", put(protected::post_unlike))
        .route("/api/posts/comment/:id", post(protected::comment_create))
        .route("/api/posts/comment/:id/:comment_id", delete(protected::comment_delete))
        .route_layer(from_fn(jwt_auth_middleware))
}

fn profile_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/profile",
            post(protected::profile_upsert).delete(protected::account_delete),
        )
        .route("/api/profile/me", get(protected::profile_me))
        .route("/api/profile/experience", put(protected::experience_add))
        .route("/api/profile/experience/:exp_id", delete(protected::experience_delete))
        .route("/api/profile/education", put(protected::education_add))
        .route("/api/profile/education/:edu_id", delete(protected::education_delete))
        .route_layer(from_fn(jwt_auth_middleware))
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "DevConnect API",
            "version": version,
            "description": "Developer social network backend built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "users": "/api/users (public - registration)",
                "auth": "/api/auth (POST public login, GET protected)",
                "posts": "/api/posts[/:id], /api/posts/like/:id, /api/posts/unlike/:id, /api/posts/comment/:id[/:comment_id] (protected)",
                "profile": "/api/profile, /api/profile/user/:user_id, /api/profile/github/:username (public reads)",
                "profile_sections": "/api/profile/me, /api/profile/experience[/:exp_id], /api/profile/education[/:edu_id] (protected)",
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(_) => (
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
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
