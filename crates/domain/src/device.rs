//! Device — a machine that can be woken over the network.

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, WakeHubError};
use crate::id::DeviceId;
use crate::input;
use crate::mac::MacAddress;

/// A wakeable machine with its hardware address and optional static IP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    pub mac_address: MacAddress,
    pub ip_address: Option<String>,
}

impl Device {
    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`WakeHubError::Validation`] when `name` is empty or the
    /// stored IP address is not a valid dotted quad.
    pub fn validate(&self) -> Result<(), WakeHubError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if let Some(ip) = &self.ip_address {
            input::validate_ip(ip)?;
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Device`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    id: Option<DeviceId>,
    name: Option<String>,
    mac_address: Option<MacAddress>,
    ip_address: Option<String>,
}

impl DeviceBuilder {
    #[must_use]
    pub fn id(mut self, id: DeviceId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn mac_address(mut self, mac_address: MacAddress) -> Self {
        self.mac_address = Some(mac_address);
        self
    }

    #[must_use]
    pub fn ip_address(mut self, ip_address: impl Into<String>) -> Self {
        self.ip_address = Some(ip_address.into());
        self
    }

    /// Consume the builder, validate, and return a [`Device`].
    ///
    /// # Errors
    ///
    /// Returns [`WakeHubError::Validation`] if the name is missing, the MAC
    /// address is missing, or the IP address fails the dotted-quad check.
    pub fn build(self) -> Result<Device, WakeHubError> {
        let mac_address = self
            .mac_address
            .ok_or(ValidationError::InvalidMacAddress)?;
        let device = Device {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            mac_address,
            ip_address: self.ip_address,
        };
        device.validate()?;
        Ok(device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mac() -> MacAddress {
        "A4:C1:38:5B:0E:DF".parse().unwrap()
    }

    #[test]
    fn should_build_valid_device_when_name_and_mac_provided() {
        let device = Device::builder()
            .name("Office PC")
            .mac_address(mac())
            .build()
            .unwrap();
        assert_eq!(device.name, "Office PC");
        assert!(device.ip_address.is_none());
    }

    #[test]
    fn should_reject_missing_mac_address() {
        let result = Device::builder().name("Office PC").build();
        assert!(matches!(
            result,
            Err(WakeHubError::Validation(ValidationError::InvalidMacAddress))
        ));
    }

    #[test]
    fn should_reject_empty_name() {
        let result = Device::builder().mac_address(mac()).build();
        assert!(matches!(
            result,
            Err(WakeHubError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_accept_valid_ip_address() {
        let device = Device::builder()
            .name("NAS")
            .mac_address(mac())
            .ip_address("192.168.1.50")
            .build()
            .unwrap();
        assert_eq!(device.ip_address.as_deref(), Some("192.168.1.50"));
    }

    #[test]
    fn should_reject_out_of_range_ip_address() {
        let result = Device::builder()
            .name("NAS")
            .mac_address(mac())
            .ip_address("999.999.999.999")
            .build();
        assert!(matches!(
            result,
            Err(WakeHubError::Validation(ValidationError::InvalidIpAddress))
        ));
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let device = Device::builder()
            .name("Office PC")
            .mac_address(mac())
            .ip_address("10.0.0.2")
            .build()
            .unwrap();
        let json = serde_json::to_string(&device).unwrap();
        let parsed: Device = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, device.id);
        assert_eq!(parsed.mac_address, device.mac_address);
    }
}
