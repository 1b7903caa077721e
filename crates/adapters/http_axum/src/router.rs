//! Axum router assembly.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use wakehub_app::ports::{DeviceRepository, EventStore, UserRepository, WakeSender};

use crate::session::SessionLayer;
use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Merges API routes under `/api` and the HTML pages at `/`. The session
/// layer guards everything except the login page and `/health`; the
/// [`TraceLayer`] logs each HTTP request/response at the `DEBUG` level
/// through the `tracing` ecosystem.
pub fn build<UR, DR, ES, WS>(state: AppState<UR, DR, ES, WS>) -> Router
where
    UR: UserRepository + Send + Sync + 'static,
    DR: DeviceRepository + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
    WS: WakeSender + Send + Sync + 'static,
{
    let session_layer = SessionLayer {
        config: Arc::clone(&state.sessions),
    };

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .merge(crate::pages::routes())
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
