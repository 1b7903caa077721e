//! Shared application state for axum handlers.

use std::sync::Arc;

use wakehub_app::ports::{DeviceRepository, EventStore, UserRepository, WakeSender};
use wakehub_app::services::device_service::DeviceService;
use wakehub_app::services::user_service::UserService;
use wakehub_app::services::wake_service::WakeService;

use crate::session::SessionConfig;

/// Application state shared across all axum handlers.
///
/// Generic over the repository, event store, and wake sender types to avoid
/// dynamic dispatch. `Clone` is implemented manually so the underlying types
/// themselves do not need to be `Clone` — only the `Arc` wrappers are cloned.
pub struct AppState<UR, DR, ES, WS> {
    /// Account management and authentication.
    pub user_service: Arc<UserService<UR>>,
    /// Device CRUD service.
    pub device_service: Arc<DeviceService<DR>>,
    /// Wake-attempt use-case.
    pub wake_service: Arc<WakeService<ES, WS>>,
    /// Event store for dashboard counters and history.
    pub event_store: Arc<ES>,
    /// Session token signing and verification.
    pub sessions: Arc<SessionConfig>,
}

impl<UR, DR, ES, WS> Clone for AppState<UR, DR, ES, WS> {
    fn clone(&self) -> Self {
        Self {
            user_service: Arc::clone(&self.user_service),
            device_service: Arc::clone(&self.device_service),
            wake_service: Arc::clone(&self.wake_service),
            event_store: Arc::clone(&self.event_store),
            sessions: Arc::clone(&self.sessions),
        }
    }
}

impl<UR, DR, ES, WS> AppState<UR, DR, ES, WS>
where
    UR: UserRepository + Send + Sync + 'static,
    DR: DeviceRepository + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
    WS: WakeSender + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        user_service: UserService<UR>,
        device_service: DeviceService<DR>,
        wake_service: WakeService<ES, WS>,
        event_store: ES,
        sessions: SessionConfig,
    ) -> Self {
        Self {
            user_service: Arc::new(user_service),
            device_service: Arc::new(device_service),
            wake_service: Arc::new(wake_service),
            event_store: Arc::new(event_store),
            sessions: Arc::new(sessions),
        }
    }
}
