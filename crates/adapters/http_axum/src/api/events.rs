//! JSON handler for the wake-event log.

use axum::Json;
use axum::extract::State;

use wakehub_app::ports::{DeviceRepository, EventStore, UserRepository, WakeSender};
use wakehub_domain::event::WakeEvent;

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/events` — list recent wake events, newest first.
pub async fn list<UR, DR, ES, WS>(
    State(state): State<AppState<UR, DR, ES, WS>>,
) -> Result<Json<Vec<WakeEvent>>, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    DR: DeviceRepository + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
    WS: WakeSender + Send + Sync + 'static,
{
    let events = state.event_store.get_recent(100).await?;
    Ok(Json(events))
}
