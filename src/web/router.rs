//! Router configuration for the web layer.

use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{forum_threads, AppState};
use super::middleware::{jwt_auth, JwtState};

/// Create the main router.
pub fn create_router(app_state: Arc<AppState>, jwt_state: Arc<JwtState>) -> Router {
    // The tail after /forum/ carries slug, id, sort, filter and page
    let forum_routes = Router::new().route("/*path", get(forum_threads));

    Router::new()
        .nest("/forum", forum_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(move |req, next| {
                    let state = jwt_state.clone();
                    jwt_auth(state, req, next)
                })),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThreadsConfig;
    use crate::Database;

    #[test]
    fn test_create_health_router() {
        let _router = create_health_router();
    }

    #[tokio::test]
    async fn test_create_router() {
        let db = Database::open_in_memory().await.unwrap();
        let app_state = Arc::new(AppState::new(Arc::new(db), ThreadsConfig::default()));
        let jwt_state = Arc::new(JwtState::new("secret"));
        let _router = create_router(app_state, jwt_state);
    }
}
