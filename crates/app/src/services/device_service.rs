//! Device service — use-cases for managing wakeable devices.

use wakehub_domain::device::Device;
use wakehub_domain::error::{NotFoundError, WakeHubError};
use wakehub_domain::id::DeviceId;

use crate::ports::DeviceRepository;

/// Application service for device CRUD operations.
pub struct DeviceService<R> {
    repo: R,
}

impl<R: DeviceRepository> DeviceService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a new device after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`WakeHubError::Validation`] if invariants fail,
    /// [`WakeHubError::Conflict`] when the MAC address is already
    /// registered, or a storage error propagated from the repository.
    #[tracing::instrument(skip(self, device), fields(device_name = %device.name))]
    pub async fn create_device(&self, device: Device) -> Result<Device, WakeHubError> {
        device.validate()?;
        self.repo.create(device).await
    }

    /// Look up a device by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`WakeHubError::NotFound`] when no device with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_device(&self, id: DeviceId) -> Result<Device, WakeHubError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Device",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all devices.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_devices(&self) -> Result<Vec<Device>, WakeHubError> {
        self.repo.get_all().await
    }

    /// Delete a device by id.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_device(&self, id: DeviceId) -> Result<(), WakeHubError> {
        self.repo.delete(id).await
    }
}
