//! JSON handler exposing the declarative board options.

use axum::Json;
use axum::extract::State;

use wakehub_app::ports::{DeviceRepository, EventStore, UserRepository, WakeSender};
use wakehub_domain::dashboard::{Board, ContainerAttrs, DashboardData, EventRecord};
use wakehub_domain::event::{WakeEvent, WakeStatus};

use crate::error::ApiError;
use crate::state::AppState;

/// How many events the board's history table carries.
const EVENT_LIMIT: usize = 20;

/// `GET /api/dashboard` — the board options structure the charting library
/// consumes, assembled through the same attribute contract as the HTML
/// page.
pub async fn board<UR, DR, ES, WS>(
    State(state): State<AppState<UR, DR, ES, WS>>,
) -> Result<Json<Board>, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    DR: DeviceRepository + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
    WS: WakeSender + Send + Sync + 'static,
{
    let users = state.user_service.list_users().await?;
    let devices = state.device_service.list_devices().await?;
    let success = state.event_store.count_by_status(WakeStatus::Success).await?;
    let failed = state.event_store.count_by_status(WakeStatus::Failed).await?;
    let events = state.event_store.get_recent(EVENT_LIMIT).await?;
    let records: Vec<EventRecord> = events.iter().map(WakeEvent::to_record).collect();

    let attrs = ContainerAttrs::from_counts(
        users.len() as u64,
        devices.len() as u64,
        success,
        failed,
        &records,
    )?;
    let data = DashboardData::from_attrs(&attrs)?;

    Ok(Json(Board::from_data(&data)))
}
