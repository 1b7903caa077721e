//! Use-case services orchestrating domain objects through ports.

pub mod device_service;
pub mod user_service;
pub mod wake_service;
