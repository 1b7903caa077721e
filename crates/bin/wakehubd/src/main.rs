//! # wakehubd — wakehub daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (TOML file, env vars)
//! - Initialize tracing
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repository implementations (adapters)
//! - Construct application services, injecting repositories via port traits
//! - Optionally bootstrap the initial admin account
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use config::Config;

use wakehub_adapter_http_axum::session::SessionConfig;
use wakehub_adapter_http_axum::state::AppState;
use wakehub_adapter_storage_sqlite_sqlx::{
    SqliteDeviceRepository, SqliteEventStore, SqliteUserRepository,
};
use wakehub_adapter_wol::UdpWakeSender;
use wakehub_app::services::device_service::DeviceService;
use wakehub_app::services::user_service::{NewUser, UserService};
use wakehub_app::services::wake_service::WakeService;
use wakehub_domain::user::Role;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(
            config.logging.filter.clone(),
        ))
        .init();

    // Database
    let db = wakehub_adapter_storage_sqlite_sqlx::Config {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();

    // Repositories
    let user_repo = SqliteUserRepository::new(pool.clone());
    let device_repo = SqliteDeviceRepository::new(pool.clone());
    let event_store = SqliteEventStore::new(pool.clone());
    let wake_events = SqliteEventStore::new(pool);

    // Services
    let user_service = UserService::new(user_repo);
    let device_service = DeviceService::new(device_repo);
    let wake_service = WakeService::new(wake_events, UdpWakeSender::new(config.wol_target()?));

    if let Some(password) = &config.auth.admin_password {
        bootstrap_admin(&user_service, password).await?;
    }

    // HTTP
    let sessions = SessionConfig::new(&config.auth.secret, config.auth.session_ttl_minutes);
    let state = AppState::new(
        user_service,
        device_service,
        wake_service,
        event_store,
        sessions,
    );
    let app = wakehub_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    tracing::info!(%bind_addr, "wakehubd listening");

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Create the initial `admin` account when the user table is empty.
async fn bootstrap_admin<R>(
    user_service: &UserService<R>,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>>
where
    R: wakehub_app::ports::UserRepository,
{
    if !user_service.list_users().await?.is_empty() {
        return Ok(());
    }

    user_service
        .register(NewUser {
            full_name: "Administrator".to_string(),
            email: "admin@wakehub.local".to_string(),
            phone: "n/a".to_string(),
            username: "admin".to_string(),
            password: password.to_string(),
            role: Role::Admin,
        })
        .await?;

    tracing::info!("bootstrapped initial admin account");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutdown signal received, draining");
}
