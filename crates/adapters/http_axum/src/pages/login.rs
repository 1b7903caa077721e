//! Login and logout.

use askama::Template;
use axum::Form;
use axum::extract::{Query, State};
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, Html, IntoResponse, Redirect, Response};
use serde::Deserialize;

use wakehub_app::ports::{DeviceRepository, EventStore, UserRepository, WakeSender};
use wakehub_domain::error::WakeHubError;

use super::{Flash, FlashParams, flash_redirect};
use crate::error::PageError;
use crate::state::AppState;

/// Login page template (standalone, outside the authenticated shell).
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    flash: Option<Flash>,
}

impl IntoResponse for LoginTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// `GET /` — login form.
pub async fn page(Query(params): Query<FlashParams>) -> LoginTemplate {
    LoginTemplate {
        flash: params.into_flash(),
    }
}

/// Credentials posted by the login form.
#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// `POST /` — check credentials and establish a session (PRG).
pub async fn submit<UR, DR, ES, WS>(
    State(state): State<AppState<UR, DR, ES, WS>>,
    Form(form): Form<LoginForm>,
) -> Result<Response, PageError>
where
    UR: UserRepository + Send + Sync + 'static,
    DR: DeviceRepository + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
    WS: WakeSender + Send + Sync + 'static,
{
    match state
        .user_service
        .authenticate(&form.username, &form.password)
        .await
    {
        Ok(user) => {
            let token = state.sessions.issue(&user.username, user.role)?;
            let cookie = state.sessions.cookie(&token);
            Ok((
                AppendHeaders([(SET_COOKIE, cookie)]),
                Redirect::to("/dashboard"),
            )
                .into_response())
        }
        Err(WakeHubError::Unauthorized) => {
            Ok(flash_redirect("/", "danger", "Invalid credentials").into_response())
        }
        Err(err) => Err(err.into()),
    }
}

/// `GET /logout` — drop the session and return to the login page.
pub async fn logout<UR, DR, ES, WS>(State(state): State<AppState<UR, DR, ES, WS>>) -> Response
where
    UR: UserRepository + Send + Sync + 'static,
    DR: DeviceRepository + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
    WS: WakeSender + Send + Sync + 'static,
{
    let cookie = state.sessions.clear_cookie();
    (AppendHeaders([(SET_COOKIE, cookie)]), Redirect::to("/")).into_response()
}
