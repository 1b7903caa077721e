//! `SQLite` implementation of [`DeviceRepository`].

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use wakehub_app::ports::DeviceRepository;
use wakehub_domain::device::Device;
use wakehub_domain::error::WakeHubError;
use wakehub_domain::id::DeviceId;
use wakehub_domain::mac::MacAddress;

use crate::error::{StorageError, map_write_err};

/// Wrapper for converting database rows into domain [`Device`].
struct Wrapper(Device);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Device> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let mac_address: String = row.try_get("mac_address")?;
        let ip_address: Option<String> = row.try_get("ip_address")?;

        let id = DeviceId::from_str(&id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let mac_address = MacAddress::from_str(&mac_address)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Device {
            id,
            name,
            mac_address,
            ip_address,
        }))
    }
}

const INSERT: &str =
    "INSERT INTO devices (id, name, mac_address, ip_address) VALUES (?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM devices WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM devices ORDER BY name";
const DELETE_BY_ID: &str = "DELETE FROM devices WHERE id = ?";

/// `SQLite`-backed device repository.
pub struct SqliteDeviceRepository {
    pool: SqlitePool,
}

impl SqliteDeviceRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl DeviceRepository for SqliteDeviceRepository {
    async fn create(&self, device: Device) -> Result<Device, WakeHubError> {
        sqlx::query(INSERT)
            .bind(device.id.to_string())
            .bind(&device.name)
            .bind(device.mac_address.to_string())
            .bind(&device.ip_address)
            .execute(&self.pool)
            .await
            .map_err(|err| map_write_err(err, "Device", "MAC address"))?;

        Ok(device)
    }

    async fn get_by_id(&self, id: DeviceId) -> Result<Option<Device>, WakeHubError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn get_all(&self) -> Result<Vec<Device>, WakeHubError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn delete(&self, id: DeviceId) -> Result<(), WakeHubError> {
        sqlx::query(DELETE_BY_ID)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }
}
