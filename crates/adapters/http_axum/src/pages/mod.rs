//! Server-side rendered HTML pages.
//!
//! Every mutating form uses the POST-redirect-GET pattern; outcome messages
//! ride the redirect as `?flash=…&level=…` query parameters and render as
//! alert boxes on the next page load.

#[allow(clippy::missing_errors_doc)]
pub mod devices;
#[allow(clippy::missing_errors_doc)]
pub mod home;
#[allow(clippy::missing_errors_doc)]
pub mod login;
#[allow(clippy::missing_errors_doc)]
pub mod profile;
#[allow(clippy::missing_errors_doc)]
pub mod users;

use axum::Router;
use axum::response::Redirect;
use axum::routing::{get, post};
use serde::Deserialize;

use wakehub_app::ports::{DeviceRepository, EventStore, UserRepository, WakeSender};

use crate::state::AppState;

/// An outcome message carried through a PRG redirect.
#[derive(Debug, Clone)]
pub struct Flash {
    /// Alert level: `success`, `danger`, `info`.
    pub level: String,
    pub message: String,
}

/// Query-string form of [`Flash`], as it arrives on a GET.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlashParams {
    pub flash: Option<String>,
    pub level: Option<String>,
}

impl FlashParams {
    /// Collapse into a renderable [`Flash`], if a message is present.
    #[must_use]
    pub fn into_flash(self) -> Option<Flash> {
        self.flash.map(|message| Flash {
            level: self.level.unwrap_or_else(|| "info".to_string()),
            message,
        })
    }
}

/// Redirect to `path` carrying a flash message.
#[must_use]
pub fn flash_redirect(path: &str, level: &str, message: &str) -> Redirect {
    Redirect::to(&format!(
        "{path}?flash={}&level={level}",
        urlencode(message)
    ))
}

/// Minimal query-string escaping for flash messages: enough for the fixed
/// message set plus interpolated MAC addresses.
fn urlencode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            ' ' => out.push('+'),
            '+' => out.push_str("%2B"),
            '&' => out.push_str("%26"),
            '=' => out.push_str("%3D"),
            '%' => out.push_str("%25"),
            '#' => out.push_str("%23"),
            '?' => out.push_str("%3F"),
            other => out.push(other),
        }
    }
    out
}

/// Build the sub-router for SSR HTML pages.
pub fn routes<UR, DR, ES, WS>() -> Router<AppState<UR, DR, ES, WS>>
where
    UR: UserRepository + Send + Sync + 'static,
    DR: DeviceRepository + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
    WS: WakeSender + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/",
            get(login::page).post(login::submit::<UR, DR, ES, WS>),
        )
        .route("/logout", get(login::logout::<UR, DR, ES, WS>))
        .route("/dashboard", get(home::dashboard::<UR, DR, ES, WS>))
        .route("/wol", post(home::wake::<UR, DR, ES, WS>))
        .route(
            "/devices",
            get(devices::list::<UR, DR, ES, WS>).post(devices::create::<UR, DR, ES, WS>),
        )
        .route(
            "/devices/delete/{id}",
            post(devices::delete::<UR, DR, ES, WS>),
        )
        .route("/users", get(users::list::<UR, DR, ES, WS>))
        .route(
            "/users/add",
            get(users::add_form).post(users::add::<UR, DR, ES, WS>),
        )
        .route(
            "/users/edit/{id}",
            get(users::edit_form::<UR, DR, ES, WS>).post(users::edit::<UR, DR, ES, WS>),
        )
        .route(
            "/users/delete/{id}",
            post(users::delete::<UR, DR, ES, WS>),
        )
        .route(
            "/profile",
            get(profile::page::<UR, DR, ES, WS>).post(profile::update::<UR, DR, ES, WS>),
        )
}
