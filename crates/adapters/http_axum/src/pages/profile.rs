//! Self-service profile page.

use askama::Template;
use axum::Form;
use axum::extract::{Extension, Query, State};
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;

use wakehub_app::ports::{DeviceRepository, EventStore, UserRepository, WakeSender};
use wakehub_app::services::user_service::ProfileUpdate;
use wakehub_domain::error::{ValidationError, WakeHubError};

use super::{Flash, FlashParams, flash_redirect};
use crate::error::PageError;
use crate::session::CurrentUser;
use crate::state::AppState;

/// Profile page template.
#[derive(Template)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    username: String,
    is_admin: bool,
    flash: Option<Flash>,
    full_name: String,
    email: String,
    phone: String,
}

impl IntoResponse for ProfileTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// `GET /profile` — pre-filled profile form for the current user.
pub async fn page<UR, DR, ES, WS>(
    State(state): State<AppState<UR, DR, ES, WS>>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<FlashParams>,
) -> Result<ProfileTemplate, PageError>
where
    UR: UserRepository + Send + Sync + 'static,
    DR: DeviceRepository + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
    WS: WakeSender + Send + Sync + 'static,
{
    let account = state.user_service.get_by_username(&user.username).await?;

    let is_admin = user.is_admin();
    Ok(ProfileTemplate {
        username: user.username,
        is_admin,
        flash: params.into_flash(),
        full_name: account.full_name,
        email: account.email,
        phone: account.phone,
    })
}

/// Profile form body.
#[derive(Deserialize)]
pub struct ProfileForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub password_confirm: String,
}

/// `POST /profile` — update the current user's details (PRG).
pub async fn update<UR, DR, ES, WS>(
    State(state): State<AppState<UR, DR, ES, WS>>,
    Extension(user): Extension<CurrentUser>,
    Form(form): Form<ProfileForm>,
) -> Result<Response, PageError>
where
    UR: UserRepository + Send + Sync + 'static,
    DR: DeviceRepository + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
    WS: WakeSender + Send + Sync + 'static,
{
    if form.full_name.is_empty() || form.email.is_empty() || form.phone.is_empty() {
        return Ok(flash_redirect(
            "/profile",
            "danger",
            "Full Name, Email, and Phone are required fields.",
        )
        .into_response());
    }

    let update = ProfileUpdate {
        full_name: form.full_name,
        email: form.email,
        phone: form.phone,
        password: form.password,
        password_confirm: form.password_confirm,
    };

    match state.user_service.update_profile(&user.username, update).await {
        Ok(_) => Ok(
            flash_redirect("/profile", "success", "Profile updated successfully").into_response(),
        ),
        Err(WakeHubError::Validation(ValidationError::InvalidEmail)) => {
            Ok(flash_redirect("/profile", "danger", "Invalid email format.").into_response())
        }
        Err(WakeHubError::Validation(ValidationError::PasswordMismatch)) => {
            Ok(flash_redirect("/profile", "danger", "Passwords do not match.").into_response())
        }
        Err(WakeHubError::Validation(err)) => {
            Ok(flash_redirect("/profile", "danger", &err.to_string()).into_response())
        }
        Err(err) => Err(err.into()),
    }
}
