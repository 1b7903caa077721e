//! End-to-end smoke tests for the full wakehubd stack.
//!
//! Each test spins up the complete application (in-memory `SQLite`, real
//! repos, real services, real axum router) and exercises the HTTP layer via
//! `tower::ServiceExt::oneshot` — no TCP port is bound. Magic packets are
//! aimed at a localhost UDP address so nothing leaves the machine.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use wakehub_adapter_http_axum::router;
use wakehub_adapter_http_axum::session::SessionConfig;
use wakehub_adapter_http_axum::state::AppState;
use wakehub_adapter_storage_sqlite_sqlx::{
    Config, SqliteDeviceRepository, SqliteEventStore, SqliteUserRepository,
};
use wakehub_adapter_wol::UdpWakeSender;
use wakehub_app::services::device_service::DeviceService;
use wakehub_app::services::user_service::{NewUser, UserService};
use wakehub_app::services::wake_service::WakeService;
use wakehub_domain::user::Role;

/// Build a fully-wired router backed by an in-memory `SQLite` database,
/// seeded with an admin account and one regular account.
async fn app() -> axum::Router {
    let db = Config {
        database_url: "sqlite::memory:".to_string(),
    }
    .build()
    .await
    .expect("in-memory database should initialise");

    let pool = db.pool().clone();

    let user_service = UserService::new(SqliteUserRepository::new(pool.clone()));
    user_service
        .register(NewUser {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.org".to_string(),
            phone: "555-0100".to_string(),
            username: "admin".to_string(),
            password: "hunter2".to_string(),
            role: Role::Admin,
        })
        .await
        .expect("admin account should register");
    user_service
        .register(NewUser {
            full_name: "Grace Hopper".to_string(),
            email: "grace@example.org".to_string(),
            phone: "555-0101".to_string(),
            username: "grace".to_string(),
            password: "hunter2".to_string(),
            role: Role::User,
        })
        .await
        .expect("regular account should register");

    let device_service = DeviceService::new(SqliteDeviceRepository::new(pool.clone()));
    let wake_service = WakeService::new(
        SqliteEventStore::new(pool.clone()),
        UdpWakeSender::new("127.0.0.1:9".parse().unwrap()),
    );

    let state = AppState::new(
        user_service,
        device_service,
        wake_service,
        SqliteEventStore::new(pool),
        SessionConfig::new("integration-test-secret", 30),
    );

    router::build(state)
}

async fn body_string(response: axum::response::Response) -> String {
    String::from_utf8(
        response
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec(),
    )
    .unwrap()
}

fn form_request(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect should carry a location")
        .to_str()
        .unwrap()
}

/// Log in and return the session cookie pair (`name=token`).
async fn login(app: &axum::Router, username: &str, password: &str) -> String {
    let response = app
        .clone()
        .oneshot(form_request(
            "/",
            &format!("username={username}&password={password}"),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");

    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login should set a session cookie")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

// ---------------------------------------------------------------------------
// Health and login
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let response = app()
        .await
        .oneshot(get_request("/health", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn should_render_login_page() {
    let response = app().await.oneshot(get_request("/", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("WakeHub"));
    assert!(body.contains("name=\"password\""));
}

#[tokio::test]
async fn should_flash_invalid_credentials_on_bad_login() {
    let response = app()
        .await
        .oneshot(form_request("/", "username=admin&password=wrong", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/?flash=Invalid+credentials&level=danger");
}

#[tokio::test]
async fn should_establish_session_on_login() {
    let app = app().await;
    let cookie = login(&app, "admin", "hunter2").await;
    assert!(cookie.starts_with("wakehub_session="));
}

#[tokio::test]
async fn should_clear_session_cookie_on_logout() {
    let app = app().await;
    let cookie = login(&app, "admin", "hunter2").await;

    let response = app
        .oneshot(get_request("/logout", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.contains("Max-Age=0"));
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_redirect_dashboard_to_login_without_session() {
    let response = app()
        .await
        .oneshot(get_request("/dashboard", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn should_render_dashboard_with_data_attributes() {
    let app = app().await;
    let cookie = login(&app, "admin", "hunter2").await;

    let response = app
        .oneshot(get_request("/dashboard", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("id=\"dashboard-container\""));
    assert!(body.contains("data-users=\"2\""));
    assert!(body.contains("data-devices=\"0\""));
    assert!(body.contains("data-success=\"0\""));
    assert!(body.contains("data-failed=\"0\""));
    assert!(body.contains("data-events="));
    assert!(!body.contains("Error loading dashboard"));
}

#[tokio::test]
async fn should_expose_board_options_over_api() {
    let app = app().await;
    let cookie = login(&app, "admin", "hunter2").await;

    let response = app
        .oneshot(get_request("/api/dashboard", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    let board: serde_json::Value = serde_json::from_str(&body).unwrap();

    assert_eq!(board["components"].as_array().unwrap().len(), 5);
    assert_eq!(board["components"][0]["type"], "KPI");
    assert_eq!(board["components"][0]["title"], "Total Users");
    assert_eq!(board["components"][0]["value"], 2);
    assert_eq!(board["gui"]["layouts"][0]["rows"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn should_return_unauthorized_json_for_api_without_session() {
    let response = app()
        .await
        .oneshot(get_request("/api/dashboard", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_string(response).await;
    assert!(body.contains("unauthorized"));
}

// ---------------------------------------------------------------------------
// Wake-on-LAN
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_flash_error_for_invalid_mac() {
    let app = app().await;
    let cookie = login(&app, "admin", "hunter2").await;

    let response = app
        .oneshot(form_request("/wol", "mac_address=zz-zz", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).contains("Invalid+MAC+address+format"));
}

#[tokio::test]
async fn should_record_wake_event_after_successful_send() {
    let app = app().await;
    let cookie = login(&app, "admin", "hunter2").await;

    // Raw hex digits: the server-side mask groups them into octet pairs.
    let response = app
        .clone()
        .oneshot(form_request(
            "/wol",
            "mac_address=a4c1385b0edf",
            Some(&cookie),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).contains("Magic+packet+sent+to"));

    let response = app
        .clone()
        .oneshot(get_request("/api/events", Some(&cookie)))
        .await
        .unwrap();
    let events: serde_json::Value =
        serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(events.as_array().unwrap().len(), 1);
    assert_eq!(events[0]["status"], "success");
    assert_eq!(events[0]["username"], "admin");

    let response = app
        .oneshot(get_request("/dashboard", Some(&cookie)))
        .await
        .unwrap();
    let body = body_string(response).await;
    assert!(body.contains("data-success=\"1\""));
}

// ---------------------------------------------------------------------------
// User management
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_complete_user_management_cycle_as_admin() {
    let app = app().await;
    let cookie = login(&app, "admin", "hunter2").await;

    let response = app
        .clone()
        .oneshot(form_request(
            "/users/add",
            "full_name=Charles+Babbage&email=charles%40example.org&phone=555-0102&username=charles&password=difference&role=user",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).contains("User+added+successfully!"));

    let response = app
        .clone()
        .oneshot(get_request("/users", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Charles Babbage"));
    assert!(body.contains("charles@example.org"));

    // The new account can sign in.
    login(&app, "charles", "difference").await;
}

#[tokio::test]
async fn should_flash_conflict_for_duplicate_username() {
    let app = app().await;
    let cookie = login(&app, "admin", "hunter2").await;

    let response = app
        .oneshot(form_request(
            "/users/add",
            "full_name=Copy&email=copy%40example.org&phone=555-0103&username=grace&password=pw&role=user",
            Some(&cookie),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).contains("Username+already+exists!"));
}

#[tokio::test]
async fn should_redirect_non_admin_away_from_user_management() {
    let app = app().await;
    let cookie = login(&app, "grace", "hunter2").await;

    let response = app
        .oneshot(get_request("/users", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
}

// ---------------------------------------------------------------------------
// Devices
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_add_device_with_masked_addresses() {
    let app = app().await;
    let cookie = login(&app, "admin", "hunter2").await;

    // Raw digits for both fields: the masks insert the separators.
    let response = app
        .clone()
        .oneshot(form_request(
            "/devices",
            "name=Office+PC&mac_address=a4c1385b0edf&ip_address=192168001050",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).contains("Device+added+successfully!"));

    let response = app
        .clone()
        .oneshot(get_request("/devices", Some(&cookie)))
        .await
        .unwrap();
    let body = body_string(response).await;
    assert!(body.contains("Office PC"));
    assert!(body.contains("A4:C1:38:5B:0E:DF"));
    assert!(body.contains("192.168.001.050"));

    let response = app
        .oneshot(get_request("/dashboard", Some(&cookie)))
        .await
        .unwrap();
    let body = body_string(response).await;
    assert!(body.contains("data-devices=\"1\""));
}

#[tokio::test]
async fn should_reject_device_with_out_of_range_ip() {
    let app = app().await;
    let cookie = login(&app, "admin", "hunter2").await;

    let response = app
        .oneshot(form_request(
            "/devices",
            "name=Broken&mac_address=010203040506&ip_address=999999999999",
            Some(&cookie),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).contains("Invalid+IP+address"));
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_flash_mismatch_when_profile_passwords_differ() {
    let app = app().await;
    let cookie = login(&app, "grace", "hunter2").await;

    let response = app
        .oneshot(form_request(
            "/profile",
            "full_name=Grace+Hopper&email=grace%40example.org&phone=555-0101&password=new&password_confirm=other",
            Some(&cookie),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).contains("Passwords+do+not+match."));
}

#[tokio::test]
async fn should_update_profile_and_allow_login_with_new_password() {
    let app = app().await;
    let cookie = login(&app, "grace", "hunter2").await;

    let response = app
        .clone()
        .oneshot(form_request(
            "/profile",
            "full_name=Grace+Hopper&email=grace%40example.org&phone=555-0199&password=cobol&password_confirm=cobol",
            Some(&cookie),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).contains("Profile+updated+successfully"));

    login(&app, "grace", "cobol").await;
}
