//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod dashboard;
#[allow(clippy::missing_errors_doc)]
pub mod events;

use axum::Router;
use axum::routing::get;

use wakehub_app::ports::{DeviceRepository, EventStore, UserRepository, WakeSender};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<UR, DR, ES, WS>() -> Router<AppState<UR, DR, ES, WS>>
where
    UR: UserRepository + Send + Sync + 'static,
    DR: DeviceRepository + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
    WS: WakeSender + Send + Sync + 'static,
{
    Router::new()
        .route("/dashboard", get(dashboard::board::<UR, DR, ES, WS>))
        .route("/events", get(events::list::<UR, DR, ES, WS>))
}
