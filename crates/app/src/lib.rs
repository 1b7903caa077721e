//! # wakehub-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `UserRepository` — CRUD for operator accounts
//!   - `DeviceRepository` — CRUD for wakeable devices
//!   - `EventStore` — append & query wake events
//!   - `WakeSender` — deliver a magic packet to a hardware address
//! - Define **use-case services**:
//!   - `UserService` — register, authenticate, manage accounts and profiles
//!   - `DeviceService` — register, list, delete devices
//!   - `WakeService` — validate, send, and record a wake attempt
//! - Password hashing lives here too: pure computation, no IO
//!
//! ## Dependency rule
//! Depends on `wakehub-domain` only. Never imports adapter crates.
//! Adapters depend on *this* crate, not the reverse.

pub mod password;
pub mod ports;
pub mod services;
