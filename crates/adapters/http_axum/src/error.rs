//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Serialize;

use wakehub_domain::dashboard::DashboardError;
use wakehub_domain::error::WakeHubError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

fn status_and_message(err: &WakeHubError) -> (StatusCode, String) {
    match err {
        WakeHubError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
        WakeHubError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
        WakeHubError::Conflict(err) => (StatusCode::CONFLICT, err.to_string()),
        WakeHubError::Unauthorized => (StatusCode::UNAUTHORIZED, err.to_string()),
        err => {
            tracing::error!(error = %err, "internal error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            )
        }
    }
}

/// Maps errors to a JSON HTTP response with appropriate status code.
pub enum ApiError {
    /// An application-layer failure.
    App(WakeHubError),
    /// A dashboard render pass aborted.
    Dashboard(DashboardError),
}

impl From<WakeHubError> for ApiError {
    fn from(err: WakeHubError) -> Self {
        Self::App(err)
    }
}

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        Self::Dashboard(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::App(err) => status_and_message(err),
            Self::Dashboard(err) => {
                tracing::error!(error = %err, "dashboard error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Maps errors reaching an HTML page handler to a minimal error page.
///
/// Expected failures (bad form input, duplicate usernames, …) never reach
/// this type — page handlers turn those into flash redirects. This is the
/// backstop for storage and signing failures.
pub enum PageError {
    /// An application-layer failure.
    App(WakeHubError),
    /// Session token issuing failed.
    Session(jsonwebtoken::errors::Error),
}

impl From<WakeHubError> for PageError {
    fn from(err: WakeHubError) -> Self {
        Self::App(err)
    }
}

impl From<jsonwebtoken::errors::Error> for PageError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Self::Session(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::App(err) => status_and_message(err),
            Self::Session(err) => {
                tracing::error!(error = %err, "failed to issue session token");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (
            status,
            Html(format!("<h1>{status}</h1><p>{message}</p>")),
        )
            .into_response()
    }
}
