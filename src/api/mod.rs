mod handlers;
mod pages;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::store::Store;

/// Shared handler state: the validated roster plus the storage backend.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub store: Arc<Store>,
}

pub fn create_router(ctx: AppContext) -> Router {
    Router::new()
        .route("/confirm", get(handlers::confirm))
        .route("/history", get(handlers::history))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(ctx)
}
