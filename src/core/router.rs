use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::core::config::AuthConfig;
use crate::core::middleware;
use crate::features::auth::routes as auth_routes;
use crate::features::auth::{AuthService, PasswordService, TokenService};
use crate::features::crimes::repository::CrimeRepository;
use crate::features::crimes::{routes as crimes_routes, CrimeService};
use crate::features::users::repository::UserRepository;
use crate::features::users::{routes as users_routes, UserService};

/// Shared service graph, built once per process over a storage backend
#[derive(Clone)]
pub struct AppServices {
    pub tokens: Arc<TokenService>,
    pub users: Arc<UserService>,
    pub auth: Arc<AuthService>,
    pub crimes: Arc<CrimeService>,
}

impl AppServices {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        crime_repo: Arc<dyn CrimeRepository>,
        config: &AuthConfig,
    ) -> Self {
        let tokens = Arc::new(TokenService::from_config(config));
        let passwords = Arc::new(PasswordService::new(config.password_min_length));
        let users = Arc::new(UserService::new(
            Arc::clone(&user_repo),
            Arc::clone(&passwords),
        ));
        let auth = Arc::new(AuthService::new(
            Arc::clone(&users),
            Arc::clone(&passwords),
            Arc::clone(&tokens),
            config.allow_admin_signup,
        ));
        let crimes = Arc::new(CrimeService::new(crime_repo, user_repo));

        Self {
            tokens,
            users,
            auth,
            crimes,
        }
    }
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "CrimeTrack API is running" }))
}

async fn health_check() -> axum::http::StatusCode {
    axum::http::StatusCode::OK
}

/// API routes without the outer HTTP layers (CORS, tracing, request id, swagger)
pub fn build_router(services: &AppServices) -> Router {
    // Protected routes (require x-auth-token)
    let protected_routes = Router::new()
        .merge(auth_routes::protected_routes(Arc::clone(&services.auth)))
        .merge(users_routes::routes(Arc::clone(&services.users)))
        .merge(crimes_routes::routes(Arc::clone(&services.crimes)))
        .route_layer(axum::middleware::from_fn_with_state(
            Arc::clone(&services.tokens),
            middleware::auth_middleware,
        ));

    // Public routes (no auth required)
    let public_routes = Router::new()
        .merge(auth_routes::public_routes(Arc::clone(&services.auth)))
        .route("/", get(root))
        .route("/health", get(health_check));

    Router::new().merge(protected_routes).merge(public_routes)
}
