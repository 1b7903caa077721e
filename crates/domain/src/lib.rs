//! # wakehub-domain
//!
//! Pure domain model for the wakehub Wake-on-LAN admin panel.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Users** (operators with roles) and **Devices** (wakeable machines)
//! - Define **Wake events** (records of delivery attempts)
//! - MAC address value type and the keystroke masks for address form fields
//! - The declarative **dashboard board** model handed to the charting library
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod dashboard;
pub mod device;
pub mod event;
pub mod input;
pub mod mac;
pub mod user;
