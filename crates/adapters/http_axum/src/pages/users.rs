//! User management pages (admin only).
//!
//! Non-admin sessions are bounced back to the dashboard, mirroring the
//! admin gate on every route in this module.

use std::str::FromStr;

use askama::Template;
use axum::Form;
use axum::extract::{Extension, Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;

use wakehub_app::ports::{DeviceRepository, EventStore, UserRepository, WakeSender};
use wakehub_app::services::user_service::{NewUser, UserUpdate};
use wakehub_domain::error::WakeHubError;
use wakehub_domain::id::UserId;
use wakehub_domain::user::Role;

use super::{Flash, FlashParams, flash_redirect};
use crate::error::PageError;
use crate::session::CurrentUser;
use crate::state::AppState;

fn forbid_non_admin(user: &CurrentUser) -> Option<Redirect> {
    (!user.is_admin()).then(|| Redirect::to("/dashboard"))
}

/// One row of the user table.
pub struct UserRow {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub username: String,
    pub role: String,
}

/// User list page template.
#[derive(Template)]
#[template(path = "user_list.html")]
pub struct UserListTemplate {
    username: String,
    is_admin: bool,
    flash: Option<Flash>,
    users: Vec<UserRow>,
}

impl IntoResponse for UserListTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// Add-user form template.
#[derive(Template)]
#[template(path = "user_form.html")]
pub struct UserFormTemplate {
    username: String,
    is_admin: bool,
    flash: Option<Flash>,
}

impl IntoResponse for UserFormTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// Edit-user form template, pre-filled with the account being edited.
#[derive(Template)]
#[template(path = "user_edit.html")]
pub struct UserEditTemplate {
    username: String,
    is_admin: bool,
    flash: Option<Flash>,
    user_id: String,
    full_name: String,
    email: String,
    phone: String,
    account_username: String,
    account_is_admin: bool,
}

impl IntoResponse for UserEditTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// `GET /users` — list all accounts.
pub async fn list<UR, DR, ES, WS>(
    State(state): State<AppState<UR, DR, ES, WS>>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<FlashParams>,
) -> Result<Response, PageError>
where
    UR: UserRepository + Send + Sync + 'static,
    DR: DeviceRepository + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
    WS: WakeSender + Send + Sync + 'static,
{
    if let Some(redirect) = forbid_non_admin(&user) {
        return Ok(redirect.into_response());
    }

    let users = state.user_service.list_users().await?;
    let rows = users
        .into_iter()
        .map(|account| UserRow {
            id: account.id.to_string(),
            full_name: account.full_name,
            email: account.email,
            phone: account.phone,
            username: account.username,
            role: account.role.as_str().to_string(),
        })
        .collect();

    Ok(UserListTemplate {
        username: user.username,
        is_admin: true,
        flash: params.into_flash(),
        users: rows,
    }
    .into_response())
}

/// `GET /users/add` — empty account form.
pub async fn add_form(
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<FlashParams>,
) -> Response {
    if let Some(redirect) = forbid_non_admin(&user) {
        return redirect.into_response();
    }

    UserFormTemplate {
        username: user.username,
        is_admin: true,
        flash: params.into_flash(),
    }
    .into_response()
}

/// Account form body, shared by add and edit.
#[derive(Deserialize)]
pub struct UserForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub username: String,
    pub password: String,
    pub role: String,
}

/// `POST /users/add` — create an account (PRG).
pub async fn add<UR, DR, ES, WS>(
    State(state): State<AppState<UR, DR, ES, WS>>,
    Extension(user): Extension<CurrentUser>,
    Form(form): Form<UserForm>,
) -> Result<Response, PageError>
where
    UR: UserRepository + Send + Sync + 'static,
    DR: DeviceRepository + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
    WS: WakeSender + Send + Sync + 'static,
{
    if let Some(redirect) = forbid_non_admin(&user) {
        return Ok(redirect.into_response());
    }

    let new_user = NewUser {
        full_name: form.full_name,
        email: form.email,
        phone: form.phone,
        username: form.username,
        password: form.password,
        role: Role::parse_lossy(&form.role),
    };

    match state.user_service.register(new_user).await {
        Ok(_) => {
            Ok(flash_redirect("/users", "success", "User added successfully!").into_response())
        }
        Err(WakeHubError::Conflict(_)) => {
            Ok(flash_redirect("/users", "danger", "Username already exists!").into_response())
        }
        Err(WakeHubError::Validation(err)) => {
            Ok(flash_redirect("/users/add", "danger", &err.to_string()).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

/// `GET /users/edit/{id}` — pre-filled account form.
pub async fn edit_form<UR, DR, ES, WS>(
    State(state): State<AppState<UR, DR, ES, WS>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Query(params): Query<FlashParams>,
) -> Result<Response, PageError>
where
    UR: UserRepository + Send + Sync + 'static,
    DR: DeviceRepository + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
    WS: WakeSender + Send + Sync + 'static,
{
    if let Some(redirect) = forbid_non_admin(&user) {
        return Ok(redirect.into_response());
    }

    let Ok(user_id) = UserId::from_str(&id) else {
        return Ok(flash_redirect("/users", "danger", "User not found!").into_response());
    };

    let account = match state.user_service.get_user(user_id).await {
        Ok(account) => account,
        Err(WakeHubError::NotFound(_)) => {
            return Ok(flash_redirect("/users", "danger", "User not found!").into_response());
        }
        Err(err) => return Err(err.into()),
    };

    let account_is_admin = account.is_admin();
    Ok(UserEditTemplate {
        username: user.username,
        is_admin: true,
        flash: params.into_flash(),
        user_id: account.id.to_string(),
        full_name: account.full_name,
        email: account.email,
        phone: account.phone,
        account_username: account.username,
        account_is_admin,
    }
    .into_response())
}

/// `POST /users/edit/{id}` — update an account (PRG). An empty password
/// keeps the current one.
pub async fn edit<UR, DR, ES, WS>(
    State(state): State<AppState<UR, DR, ES, WS>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Form(form): Form<UserForm>,
) -> Result<Response, PageError>
where
    UR: UserRepository + Send + Sync + 'static,
    DR: DeviceRepository + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
    WS: WakeSender + Send + Sync + 'static,
{
    if let Some(redirect) = forbid_non_admin(&user) {
        return Ok(redirect.into_response());
    }

    let Ok(user_id) = UserId::from_str(&id) else {
        return Ok(flash_redirect("/users", "danger", "User not found!").into_response());
    };

    let update = UserUpdate {
        full_name: form.full_name,
        email: form.email,
        phone: form.phone,
        password: form.password,
        role: Role::parse_lossy(&form.role),
    };

    match state.user_service.update_user(user_id, update).await {
        Ok(_) => {
            Ok(flash_redirect("/users", "success", "User updated successfully!").into_response())
        }
        Err(WakeHubError::NotFound(_)) => {
            Ok(flash_redirect("/users", "danger", "User not found!").into_response())
        }
        Err(WakeHubError::Validation(err)) => Ok(flash_redirect(
            &format!("/users/edit/{id}"),
            "danger",
            &err.to_string(),
        )
        .into_response()),
        Err(err) => Err(err.into()),
    }
}

/// `POST /users/delete/{id}` — remove an account (PRG).
pub async fn delete<UR, DR, ES, WS>(
    State(state): State<AppState<UR, DR, ES, WS>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Response, PageError>
where
    UR: UserRepository + Send + Sync + 'static,
    DR: DeviceRepository + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
    WS: WakeSender + Send + Sync + 'static,
{
    if let Some(redirect) = forbid_non_admin(&user) {
        return Ok(redirect.into_response());
    }

    let Ok(user_id) = UserId::from_str(&id) else {
        return Ok(flash_redirect("/users", "danger", "User not found!").into_response());
    };

    state.user_service.delete_user(user_id).await?;
    Ok(flash_redirect("/users", "success", "User deleted successfully!").into_response())
}
