//! # wakehub-adapter-wol
//!
//! Wake-on-LAN delivery adapter.
//!
//! ## Responsibilities
//! - Build the magic-packet payload for a hardware address
//! - Broadcast it over UDP (default `255.255.255.255:9`), implementing the
//!   `WakeSender` port defined in `wakehub-app`
//!
//! ## Dependency rule
//! Depends on `wakehub-app` (for the port trait) and `wakehub-domain` (for
//! the MAC address type). The `app` and `domain` crates must never
//! reference this adapter.

pub mod packet;
pub mod sender;

pub use packet::MagicPacket;
pub use sender::UdpWakeSender;
