//! # wakehub-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `wakehub-app::ports`
//! - Manage the `SQLite` connection pool lifecycle
//! - Run database migrations (sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `wakehub-app` (for port traits) and `wakehub-domain` (for
//! domain types). The `app` and `domain` crates must never reference this
//! adapter.

pub mod device_repo;
pub mod error;
pub mod event_store;
pub mod pool;
pub mod user_repo;

pub use device_repo::SqliteDeviceRepository;
pub use event_store::SqliteEventStore;
pub use pool::{Config, Database};
pub use user_repo::SqliteUserRepository;
