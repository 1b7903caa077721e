//! Wake port — delivery of magic packets.

use std::future::Future;

use wakehub_domain::error::WakeHubError;
use wakehub_domain::mac::MacAddress;

/// Sends a Wake-on-LAN magic packet to a hardware address.
pub trait WakeSender {
    /// Deliver one magic packet.
    fn send(&self, mac: &MacAddress)
    -> impl Future<Output = Result<(), WakeHubError>> + Send;
}
