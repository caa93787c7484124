//! HTTP surface: router wiring plus the `/sharedata` handlers.

pub mod handlers;

use crate::storage::ShareStore;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

/// Shared handler state: just the injected store.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ShareStore>,
}

pub fn router(store: Arc<dyn ShareStore>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/sharedata",
            get(handlers::get_share_data).post(handlers::upload_share_data),
        )
        .with_state(AppState { store })
}
