//! Event store port — persistence for wake events.

use std::future::Future;

use wakehub_domain::error::WakeHubError;
use wakehub_domain::event::{WakeEvent, WakeStatus};

/// Repository for persisting and querying [`WakeEvent`]s.
pub trait EventStore {
    /// Persist a new event.
    fn store(
        &self,
        event: WakeEvent,
    ) -> impl Future<Output = Result<WakeEvent, WakeHubError>> + Send;

    /// Get the most recent events, ordered newest-first.
    fn get_recent(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<WakeEvent>, WakeHubError>> + Send;

    /// Count events with the given status.
    fn count_by_status(
        &self,
        status: WakeStatus,
    ) -> impl Future<Output = Result<u64, WakeHubError>> + Send;
}
