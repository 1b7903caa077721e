//! Dashboard page and the quick-wake form.

use askama::Template;
use axum::Form;
use axum::extract::{Extension, Query, State};
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;

use wakehub_app::ports::{DeviceRepository, EventStore, UserRepository, WakeSender};
use wakehub_domain::dashboard::{self, ContainerAttrs, EventRecord};
use wakehub_domain::error::WakeHubError;
use wakehub_domain::event::{WakeEvent, WakeStatus};
use wakehub_domain::input;

use super::{Flash, FlashParams, flash_redirect};
use crate::error::PageError;
use crate::session::CurrentUser;
use crate::state::AppState;

/// How many events the history table shows.
const EVENT_LIMIT: usize = 20;

/// The rendered board and the raw attribute values embedded alongside it.
pub struct BoardView {
    pub users: String,
    pub devices: String,
    pub success: String,
    pub failed: String,
    pub events_json: String,
    pub options_json: String,
}

/// Dashboard page template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    username: String,
    is_admin: bool,
    flash: Option<Flash>,
    board: Option<BoardView>,
}

impl IntoResponse for DashboardTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// `GET /dashboard` — counters, charts, event history, quick-wake form.
pub async fn dashboard<UR, DR, ES, WS>(
    State(state): State<AppState<UR, DR, ES, WS>>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<FlashParams>,
) -> Result<DashboardTemplate, PageError>
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

    let board = assemble_board(
        users.len() as u64,
        devices.len() as u64,
        success,
        failed,
        &records,
    );

    let is_admin = user.is_admin();
    Ok(DashboardTemplate {
        username: user.username,
        is_admin,
        flash: params.into_flash(),
        board,
    })
}

/// One render pass: assemble the attribute snapshot, parse it back, and
/// serialise the board options. Any failure is logged once — with the raw
/// attribute values — and collapses the page to the static error notice.
fn assemble_board(
    users: u64,
    devices: u64,
    success: u64,
    failed: u64,
    records: &[EventRecord],
) -> Option<BoardView> {
    let attrs = match ContainerAttrs::from_counts(users, devices, success, failed, records) {
        Ok(attrs) => attrs,
        Err(err) => {
            tracing::error!(error = %err, "error initializing dashboard");
            return None;
        }
    };

    match dashboard::render(&attrs) {
        Ok(options_json) => Some(BoardView {
            users: attrs.users.unwrap_or_default(),
            devices: attrs.devices.unwrap_or_default(),
            success: attrs.success.unwrap_or_default(),
            failed: attrs.failed.unwrap_or_default(),
            events_json: attrs.events.unwrap_or_default(),
            options_json,
        }),
        Err(err) => {
            tracing::error!(
                error = %err,
                users = ?attrs.users,
                devices = ?attrs.devices,
                success = ?attrs.success,
                failed = ?attrs.failed,
                events = ?attrs.events,
                "error initializing dashboard"
            );
            None
        }
    }
}

/// Quick-wake form body.
#[derive(Deserialize)]
pub struct WakeForm {
    pub mac_address: String,
    pub device_name: Option<String>,
}

/// `POST /wol` — send a magic packet and flash the outcome (PRG).
pub async fn wake<UR, DR, ES, WS>(
    State(state): State<AppState<UR, DR, ES, WS>>,
    Extension(user): Extension<CurrentUser>,
    Form(form): Form<WakeForm>,
) -> Result<Response, PageError>
where
    UR: UserRepository + Send + Sync + 'static,
    DR: DeviceRepository + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
    WS: WakeSender + Send + Sync + 'static,
{
    let masked = input::mask_mac(&form.mac_address);
    let device_name = form
        .device_name
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| masked.clone());

    match state
        .wake_service
        .wake(&masked, &device_name, &user.username)
        .await
    {
        Ok(mac) => Ok(flash_redirect(
            "/dashboard",
            "success",
            &format!("Magic packet sent to {mac}"),
        )
        .into_response()),
        Err(WakeHubError::Validation(err)) => {
            Ok(flash_redirect("/dashboard", "danger", &err.to_string()).into_response())
        }
        Err(WakeHubError::Wake(_)) => Ok(flash_redirect(
            "/dashboard",
            "danger",
            "Failed to send magic packet.",
        )
        .into_response()),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_assemble_board_with_attribute_snapshot() {
        let records = vec![EventRecord {
            event_time: "2026-08-01 10:00:00".to_string(),
            device_name: "Office PC".to_string(),
            username: "ada".to_string(),
            status: "success".to_string(),
        }];

        let board = assemble_board(3, 5, 12, 2, &records).unwrap();
        assert_eq!(board.users, "3");
        assert_eq!(board.failed, "2");
        assert!(board.events_json.contains("Office PC"));
        assert!(board.options_json.contains("\"Total Users\""));
        assert!(board.options_json.contains("kpi-devices"));
    }

    #[test]
    fn should_assemble_board_with_empty_history() {
        let board = assemble_board(0, 0, 0, 0, &[]).unwrap();
        assert_eq!(board.events_json, "[]");
    }
}
