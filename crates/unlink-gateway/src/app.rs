use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_handler, delete_handler, expand_handler, health_handler, statistics_handler,
    update_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/create", post(create_handler))
            .route("/update", put(update_handler))
            .route("/delete", delete(delete_handler))
            .route("/stats/{shortcut}", get(statistics_handler))
            .route("/{shortcut}", get(expand_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
