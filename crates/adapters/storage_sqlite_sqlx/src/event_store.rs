//! `SQLite` implementation of [`EventStore`].

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use wakehub_app::ports::EventStore;
use wakehub_domain::error::WakeHubError;
use wakehub_domain::event::{WakeEvent, WakeStatus};
use wakehub_domain::id::EventId;

use crate::error::StorageError;

struct Wrapper(WakeEvent);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let event_time: String = row.try_get("event_time")?;
        let device_name: String = row.try_get("device_name")?;
        let username: String = row.try_get("username")?;
        let status: String = row.try_get("status")?;

        let id = EventId::from_str(&id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let event_time = chrono::DateTime::parse_from_rfc3339(&event_time)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?
            .to_utc();
        let status = WakeStatus::from_str(&status)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(WakeEvent {
            id,
            event_time,
            device_name,
            username,
            status,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO wake_events (id, event_time, device_name, username, status)
    VALUES (?, ?, ?, ?, ?)
";
const SELECT_RECENT: &str = "SELECT * FROM wake_events ORDER BY event_time DESC LIMIT ?";
const COUNT_BY_STATUS: &str = "SELECT COUNT(*) FROM wake_events WHERE status = ?";

/// `SQLite`-backed wake-event store.
pub struct SqliteEventStore {
    pool: SqlitePool,
}

impl SqliteEventStore {
    /// Create a new event store using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl EventStore for SqliteEventStore {
    async fn store(&self, event: WakeEvent) -> Result<WakeEvent, WakeHubError> {
        sqlx::query(INSERT)
            .bind(event.id.to_string())
            .bind(event.event_time.to_rfc3339())
            .bind(&event.device_name)
            .bind(&event.username)
            .bind(event.status.as_str())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(event)
    }

    async fn get_recent(&self, limit: usize) -> Result<Vec<WakeEvent>, WakeHubError> {
        let limit = i32::try_from(limit).unwrap_or(i32::MAX);
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_RECENT)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn count_by_status(&self, status: WakeStatus) -> Result<u64, WakeHubError> {
        let count: i64 = sqlx::query_scalar(COUNT_BY_STATUS)
            .bind(status.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(u64::try_from(count).unwrap_or(0))
    }
}
