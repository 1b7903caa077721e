//! `SQLite` implementation of [`UserRepository`].

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use wakehub_app::ports::UserRepository;
use wakehub_domain::error::WakeHubError;
use wakehub_domain::id::UserId;
use wakehub_domain::user::{Role, User};

use crate::error::{StorageError, map_write_err};

/// Wrapper for converting database rows into domain [`User`].
struct Wrapper(User);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<User> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let full_name: String = row.try_get("full_name")?;
        let email: String = row.try_get("email")?;
        let phone: String = row.try_get("phone")?;
        let username: String = row.try_get("username")?;
        let password_hash: String = row.try_get("password_hash")?;
        let role: String = row.try_get("role")?;

        let id = UserId::from_str(&id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(User {
            id,
            full_name,
            email,
            phone,
            username,
            password_hash,
            role: Role::parse_lossy(&role),
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO users (id, full_name, email, phone, username, password_hash, role)
    VALUES (?, ?, ?, ?, ?, ?, ?)
";
const SELECT_BY_ID: &str = "SELECT * FROM users WHERE id = ?";
const SELECT_BY_USERNAME: &str = "SELECT * FROM users WHERE username = ?";
const SELECT_ALL: &str = "SELECT * FROM users ORDER BY username";
const UPDATE: &str = r"
    UPDATE users SET full_name = ?, email = ?, phone = ?, username = ?, password_hash = ?, role = ?
    WHERE id = ?
";
const DELETE_BY_ID: &str = "DELETE FROM users WHERE id = ?";

/// `SQLite`-backed user repository.
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: User) -> Result<User, WakeHubError> {
        sqlx::query(INSERT)
            .bind(user.id.to_string())
            .bind(&user.full_name)
            .bind(&user.email)
            .bind(&user.phone)
            .bind(&user.username)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .execute(&self.pool)
            .await
            .map_err(|err| map_write_err(err, "User", "username"))?;

        Ok(user)
    }

    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, WakeHubError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, WakeHubError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_USERNAME)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn get_all(&self) -> Result<Vec<User>, WakeHubError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update(&self, user: User) -> Result<User, WakeHubError> {
        sqlx::query(UPDATE)
            .bind(&user.full_name)
            .bind(&user.email)
            .bind(&user.phone)
            .bind(&user.username)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|err| map_write_err(err, "User", "username"))?;

        Ok(user)
    }

    async fn delete(&self, id: UserId) -> Result<(), WakeHubError> {
        sqlx::query(DELETE_BY_ID)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }
}
