//! HTTP route handlers.
//!
//! One action endpoint, three methods:
//! - GET: action descriptor for discovery
//! - OPTIONS: identical to GET (CORS preflight)
//! - POST: build the unsigned transfer transaction

pub mod actions;

use axum::routing::get;
use axum::Router;
use std::sync::Arc;

use crate::app_state::AppState;

/// Path of the one action this service exposes
pub const ACTION_PATH: &str = "/api/actions/talk-with-me";

/// Create router with state - called from main()
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            ACTION_PATH,
            get(actions::get_action)
                .options(actions::options_action)
                .post(actions::post_action),
        )
        .with_state(state)
}
