//! Magic-packet payload construction.

use wakehub_domain::mac::MacAddress;

/// A Wake-on-LAN magic packet: six `0xFF` bytes followed by the target
/// hardware address repeated sixteen times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MagicPacket {
    payload: [u8; Self::LEN],
}

impl MagicPacket {
    /// Total payload length: 6-byte synchronisation stream + 16 × 6 bytes.
    pub const LEN: usize = 6 + 16 * 6;

    /// Build the payload for `mac`.
    #[must_use]
    pub fn new(mac: &MacAddress) -> Self {
        let mut payload = [0xFF; Self::LEN];
        let octets = mac.octets();
        for repetition in payload[6..].chunks_exact_mut(6) {
            repetition.copy_from_slice(&octets);
        }
        Self { payload }
    }

    /// The raw bytes to put on the wire.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.payload
    }
}
