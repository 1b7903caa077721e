//! UDP broadcast implementation of the [`WakeSender`] port.

use std::net::SocketAddr;

use tokio::net::UdpSocket;

use wakehub_app::ports::WakeSender;
use wakehub_domain::error::WakeHubError;
use wakehub_domain::mac::MacAddress;

use crate::packet::MagicPacket;

/// Sends magic packets from an ephemeral UDP socket with broadcast enabled.
///
/// A fresh socket per send keeps the adapter stateless; wake attempts are
/// rare enough that socket reuse buys nothing.
pub struct UdpWakeSender {
    target: SocketAddr,
}

impl UdpWakeSender {
    /// Create a sender aimed at the given broadcast (or unicast) address.
    #[must_use]
    pub fn new(target: SocketAddr) -> Self {
        Self { target }
    }

    /// The address packets are sent to.
    #[must_use]
    pub fn target(&self) -> SocketAddr {
        self.target
    }
}

impl WakeSender for UdpWakeSender {
    async fn send(&self, mac: &MacAddress) -> Result<(), WakeHubError> {
        let packet = MagicPacket::new(mac);

        let socket = UdpSocket::bind(("0.0.0.0", 0)).await.map_err(wake_err)?;
        socket.set_broadcast(true).map_err(wake_err)?;
        socket
            .send_to(packet.as_bytes(), self.target)
            .await
            .map_err(wake_err)?;

        tracing::debug!(%mac, target = %self.target, "magic packet dispatched");
        Ok(())
    }
}

fn wake_err(err: std::io::Error) -> WakeHubError {
    WakeHubError::Wake(Box::new(err))
}
