use crate::db::Database;
use crate::handlers::index::hello;
use axum::{Router, routing::get};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

pub fn app_router(state: AppState) -> Router {
    Router::new().route("/", get(hello)).with_state(state)
}
