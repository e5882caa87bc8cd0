//! Axum router wiring for the ops surface.

use axum::{routing::get, Router};

use crate::{app_state::ConsoleState, ops};

pub fn build_ops_router(state: ConsoleState) -> Router {
    Router::new()
        .route("/healthz", get(ops::healthz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
