//! # wakehub-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **server-side-rendered HTML panel**: login, dashboard,
//!   devices, user management, profile — plain HTML forms using the
//!   POST-redirect-GET pattern
//! - Serve a small **JSON API** (`/api/dashboard`, `/api/events`)
//! - Validate the session cookie on every request and inject the current
//!   user into request extensions
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results into HTTP responses (HTML or JSON)
//!
//! ## Dependency rule
//! Depends on `wakehub-app` (for port traits and services) and
//! `wakehub-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod pages;
pub mod router;
pub mod session;
pub mod state;
