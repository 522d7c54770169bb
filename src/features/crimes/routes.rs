use crate::features::crimes::handlers;
use crate::features::crimes::services::CrimeService;
use axum::{routing::get, Router};
use std::sync::Arc;

/// Crime case routes (all require a valid token; mutations and stats are admin only)
pub fn routes(service: Arc<CrimeService>) -> Router {
    Router::new()
        .route(
            "/api/crimes",
            get(handlers::list_crimes).post(handlers::create_crime),
        )
        .route("/api/crimes/stats/overview", get(handlers::get_stats))
        .route(
            "/api/crimes/{id}",
            get(handlers::get_crime)
                .put(handlers::update_crime)
                .delete(handlers::delete_crime),
        )
        .with_state(service)
}
