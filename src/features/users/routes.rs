use crate::features::users::handlers;
use crate::features::users::services::UserService;
use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

/// User administration routes (all require admin access)
pub fn routes(service: Arc<UserService>) -> Router {
    Router::new()
        .route(
            "/api/users",
            get(handlers::list_users).post(handlers::create_user),
        )
        .route(
            "/api/users/{id}",
            put(handlers::update_user).delete(handlers::delete_user),
        )
        .with_state(service)
}
