//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`WakeHubError`]
//! via `#[from]` (or an explicit `From` impl for boxed adapter errors).

/// Top-level error type crossing layer boundaries.
#[derive(Debug, thiserror::Error)]
pub enum WakeHubError {
    /// A domain invariant was violated.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The requested record does not exist.
    #[error("{0}")]
    NotFound(#[from] NotFoundError),

    /// A uniqueness constraint was violated.
    #[error("{0}")]
    Conflict(#[from] ConflictError),

    /// Authentication failed.
    #[error("invalid credentials")]
    Unauthorized,

    /// The persistence layer failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A wake packet could not be delivered.
    #[error("wake delivery failed")]
    Wake(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Password hashing or verification failed internally.
    #[error("password hashing failed")]
    PasswordHash(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A name field was empty.
    #[error("name must not be empty")]
    EmptyName,

    /// The username field was empty.
    #[error("username must not be empty")]
    EmptyUsername,

    /// The phone field was empty.
    #[error("phone must not be empty")]
    EmptyPhone,

    /// The email field did not look like an address.
    #[error("Invalid email format.")]
    InvalidEmail,

    /// The password field was empty.
    #[error("password must not be empty")]
    EmptyPassword,

    /// Password and confirmation differ.
    #[error("Passwords do not match.")]
    PasswordMismatch,

    /// A MAC address failed to parse.
    #[error("Invalid MAC address format")]
    InvalidMacAddress,

    /// An IP address failed the four-octet check.
    #[error("Invalid IP address")]
    InvalidIpAddress,
}

/// A lookup that found nothing.
#[derive(Debug, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Human-readable entity kind ("User", "Device", …).
    pub entity: &'static str,
    /// The identifier that was looked up.
    pub id: String,
}

/// A write that collided with an existing record.
#[derive(Debug, thiserror::Error)]
#[error("{entity} with this {field} already exists")]
pub struct ConflictError {
    /// Human-readable entity kind.
    pub entity: &'static str,
    /// The conflicting column.
    pub field: &'static str,
}
