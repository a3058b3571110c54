//! HTTP adapter
//!
//! Depends only on core/. Never imports from cli/.
//!
//! # Routes
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET | `/` | HTML listing of every configured directory |
//! | POST | `/update` | add a directory and/or tunnel domain |
//! | GET | `/api/library` | listing as JSON |
//! | GET | `/health` | liveness and version |
//! | GET | `/files/:index/*path` | file from the `index`-th directory |
//! | GET | `/static/*` | static assets |

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod render;

pub use handlers::*;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::core::services::Services;

/// Build the application router
///
/// Static assets are served from the configured `static_dir`.
pub fn router(services: Arc<Services>) -> Router {
    let static_dir = services.settings.server.static_dir.clone();

    Router::new()
        .route("/", get(index_handler))
        .route("/update", post(update_handler))
        .route("/api/library", get(library_handler))
        .route("/health", get(health_handler))
        .route("/files/:index/*path", get(file_handler))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(axum_middleware::from_fn(middleware::log_request))
        .layer(TraceLayer::new_for_http())
        .with_state(services)
}
