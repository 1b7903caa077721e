//! Wake service — validate, deliver, and record a wake attempt.

use wakehub_domain::error::WakeHubError;
use wakehub_domain::event::{WakeEvent, WakeStatus};
use wakehub_domain::mac::MacAddress;

use crate::ports::{EventStore, WakeSender};

/// Application service for Wake-on-LAN attempts.
///
/// Every delivery attempt — successful or not — is appended to the event
/// store; a MAC address that fails to parse is rejected before anything is
/// sent or recorded.
pub struct WakeService<ES, WS> {
    events: ES,
    sender: WS,
}

impl<ES: EventStore, WS: WakeSender> WakeService<ES, WS> {
    /// Create a new service from an event store and a packet sender.
    pub fn new(events: ES, sender: WS) -> Self {
        Self { events, sender }
    }

    /// Parse the submitted MAC address, send a magic packet, and record the
    /// outcome under `device_name`/`username`.
    ///
    /// # Errors
    ///
    /// Returns [`WakeHubError::Validation`] for an unparseable MAC address,
    /// [`WakeHubError::Wake`] when delivery fails (the failure is recorded
    /// first), or a storage error from the event store.
    #[tracing::instrument(skip(self))]
    pub async fn wake(
        &self,
        raw_mac: &str,
        device_name: &str,
        username: &str,
    ) -> Result<MacAddress, WakeHubError> {
        let mac: MacAddress = raw_mac.parse()?;

        match self.sender.send(&mac).await {
            Ok(()) => {
                self.events
                    .store(WakeEvent::new(device_name, username, WakeStatus::Success))
                    .await?;
                tracing::info!(%mac, device_name, "magic packet sent");
                Ok(mac)
            }
            Err(err) => {
                self.events
                    .store(WakeEvent::new(device_name, username, WakeStatus::Failed))
                    .await?;
                tracing::warn!(%mac, device_name, "wake delivery failed");
                Err(err)
            }
        }
    }
}
