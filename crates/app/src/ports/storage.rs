//! Storage ports — repository traits for persistence.

use std::future::Future;

use wakehub_domain::device::Device;
use wakehub_domain::error::WakeHubError;
use wakehub_domain::id::{DeviceId, UserId};
use wakehub_domain::user::User;

/// Repository for persisting [`User`] accounts.
pub trait UserRepository {
    /// Persist a new user.
    fn create(&self, user: User) -> impl Future<Output = Result<User, WakeHubError>> + Send;

    /// Get a user by its unique identifier.
    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, WakeHubError>> + Send;

    /// Get a user by its unique username.
    fn get_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<User>, WakeHubError>> + Send;

    /// List all users.
    fn get_all(&self) -> impl Future<Output = Result<Vec<User>, WakeHubError>> + Send;

    /// Overwrite an existing user.
    fn update(&self, user: User) -> impl Future<Output = Result<User, WakeHubError>> + Send;

    /// Delete a user by id.
    fn delete(&self, id: UserId) -> impl Future<Output = Result<(), WakeHubError>> + Send;
}

/// Repository for persisting [`Device`] records.
pub trait DeviceRepository {
    /// Persist a new device.
    fn create(&self, device: Device) -> impl Future<Output = Result<Device, WakeHubError>> + Send;

    /// Get a device by its unique identifier.
    fn get_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, WakeHubError>> + Send;

    /// List all devices.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, WakeHubError>> + Send;

    /// Delete a device by id.
    fn delete(&self, id: DeviceId) -> impl Future<Output = Result<(), WakeHubError>> + Send;
}
