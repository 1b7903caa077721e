//! Device list and management forms.

use std::str::FromStr;

use askama::Template;
use axum::Form;
use axum::extract::{Extension, Path, Query, State};
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;

use wakehub_app::ports::{DeviceRepository, EventStore, UserRepository, WakeSender};
use wakehub_domain::device::Device;
use wakehub_domain::error::WakeHubError;
use wakehub_domain::id::DeviceId;
use wakehub_domain::input;
use wakehub_domain::mac::MacAddress;

use super::{Flash, FlashParams, flash_redirect};
use crate::error::PageError;
use crate::session::CurrentUser;
use crate::state::AppState;

/// One row of the device table.
pub struct DeviceRow {
    pub id: String,
    pub name: String,
    pub mac_address: String,
    pub ip_address: String,
}

/// Device list page template.
#[derive(Template)]
#[template(path = "device_list.html")]
pub struct DeviceListTemplate {
    username: String,
    is_admin: bool,
    flash: Option<Flash>,
    devices: Vec<DeviceRow>,
}

impl IntoResponse for DeviceListTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// `GET /devices` — list all devices with wake buttons and the add form.
pub async fn list<UR, DR, ES, WS>(
    State(state): State<AppState<UR, DR, ES, WS>>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<FlashParams>,
) -> Result<DeviceListTemplate, PageError>
where
    UR: UserRepository + Send + Sync + 'static,
    DR: DeviceRepository + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
    WS: WakeSender + Send + Sync + 'static,
{
    let devices = state.device_service.list_devices().await?;
    let rows = devices
        .into_iter()
        .map(|device| DeviceRow {
            id: device.id.to_string(),
            name: device.name,
            mac_address: device.mac_address.to_string(),
            ip_address: device.ip_address.unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    let is_admin = user.is_admin();
    Ok(DeviceListTemplate {
        username: user.username,
        is_admin,
        flash: params.into_flash(),
        devices: rows,
    })
}

/// Add-device form body.
#[derive(Deserialize)]
pub struct DeviceForm {
    pub name: String,
    pub mac_address: String,
    pub ip_address: String,
}

/// `POST /devices` — register a device (PRG).
///
/// Both address fields pass through the same masks the input fields apply
/// keystroke by keystroke, so a value that survived the client also
/// survives here.
pub async fn create<UR, DR, ES, WS>(
    State(state): State<AppState<UR, DR, ES, WS>>,
    Form(form): Form<DeviceForm>,
) -> Result<Response, PageError>
where
    UR: UserRepository + Send + Sync + 'static,
    DR: DeviceRepository + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
    WS: WakeSender + Send + Sync + 'static,
{
    let masked_mac = input::mask_mac(&form.mac_address);
    let mac = match MacAddress::from_str(&masked_mac) {
        Ok(mac) => mac,
        Err(err) => {
            return Ok(flash_redirect("/devices", "danger", &err.to_string()).into_response());
        }
    };

    let masked_ip = input::mask_ip(&form.ip_address);
    let ip_address = if masked_ip.is_empty() {
        None
    } else {
        if let Err(err) = input::validate_ip(&masked_ip) {
            return Ok(flash_redirect("/devices", "danger", &err.to_string()).into_response());
        }
        Some(masked_ip)
    };

    let mut builder = Device::builder().name(form.name.trim()).mac_address(mac);
    if let Some(ip) = ip_address {
        builder = builder.ip_address(ip);
    }
    let device = match builder.build() {
        Ok(device) => device,
        Err(WakeHubError::Validation(err)) => {
            return Ok(flash_redirect("/devices", "danger", &err.to_string()).into_response());
        }
        Err(err) => return Err(err.into()),
    };

    match state.device_service.create_device(device).await {
        Ok(_) => {
            Ok(flash_redirect("/devices", "success", "Device added successfully!").into_response())
        }
        Err(WakeHubError::Conflict(err)) => {
            Ok(flash_redirect("/devices", "danger", &err.to_string()).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

/// `POST /devices/delete/{id}` — remove a device (PRG).
pub async fn delete<UR, DR, ES, WS>(
    State(state): State<AppState<UR, DR, ES, WS>>,
    Path(id): Path<String>,
) -> Result<Response, PageError>
where
    UR: UserRepository + Send + Sync + 'static,
    DR: DeviceRepository + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
    WS: WakeSender + Send + Sync + 'static,
{
    let Ok(device_id) = DeviceId::from_str(&id) else {
        return Ok(flash_redirect("/devices", "danger", "Device not found!").into_response());
    };

    state.device_service.delete_device(device_id).await?;
    Ok(flash_redirect("/devices", "success", "Device deleted successfully!").into_response())
}
