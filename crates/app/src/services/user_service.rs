//! User service — use-cases for accounts, login, and profiles.

use wakehub_domain::error::{NotFoundError, ValidationError, WakeHubError};
use wakehub_domain::id::UserId;
use wakehub_domain::user::{Role, User};

use crate::password::PasswordHasher;
use crate::ports::UserRepository;

/// Input for registering a new account. The password arrives in clear and
/// is hashed before anything is persisted.
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub username: String,
    pub password: String,
    pub role: Role,
}

/// Admin-side edit of an existing account. An empty password keeps the
/// current one.
pub struct UserUpdate {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub role: Role,
}

/// Self-service profile edit. A password change requires a matching
/// confirmation; both empty means keep the current password.
pub struct ProfileUpdate {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub password_confirm: String,
}

/// Application service for account management and authentication.
pub struct UserService<R> {
    repo: R,
    hasher: PasswordHasher,
}

impl<R: UserRepository> UserService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            hasher: PasswordHasher::new(),
        }
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns [`WakeHubError::Validation`] if invariants fail or the
    /// password is empty, [`WakeHubError::Conflict`] when the username is
    /// taken, or a storage error from the repository.
    #[tracing::instrument(skip(self, new_user), fields(username = %new_user.username))]
    pub async fn register(&self, new_user: NewUser) -> Result<User, WakeHubError> {
        if new_user.password.is_empty() {
            return Err(ValidationError::EmptyPassword.into());
        }
        let password_hash = self.hasher.hash(&new_user.password)?;
        let user = User::builder()
            .full_name(new_user.full_name)
            .email(new_user.email)
            .phone(new_user.phone)
            .username(new_user.username)
            .password_hash(password_hash)
            .role(new_user.role)
            .build()?;
        self.repo.create(user).await
    }

    /// Check a username/password pair.
    ///
    /// # Errors
    ///
    /// Returns [`WakeHubError::Unauthorized`] for an unknown username or a
    /// wrong password — callers cannot tell the two apart.
    #[tracing::instrument(skip(self, password))]
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<User, WakeHubError> {
        let Some(user) = self.repo.get_by_username(username).await? else {
            return Err(WakeHubError::Unauthorized);
        };
        if self.hasher.verify(password, &user.password_hash)? {
            Ok(user)
        } else {
            Err(WakeHubError::Unauthorized)
        }
    }

    /// Look up a user by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`WakeHubError::NotFound`] when no user with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_user(&self, id: UserId) -> Result<User, WakeHubError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "User",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Look up a user by username, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`WakeHubError::NotFound`] when the username is unknown,
    /// or a storage error from the repository.
    pub async fn get_by_username(&self, username: &str) -> Result<User, WakeHubError> {
        self.repo.get_by_username(username).await?.ok_or_else(|| {
            NotFoundError {
                entity: "User",
                id: username.to_string(),
            }
            .into()
        })
    }

    /// List all users.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_users(&self) -> Result<Vec<User>, WakeHubError> {
        self.repo.get_all().await
    }

    /// Apply an admin edit to an existing account.
    ///
    /// # Errors
    ///
    /// Returns [`WakeHubError::NotFound`] when the account does not exist,
    /// [`WakeHubError::Validation`] if invariants fail, or a storage error.
    #[tracing::instrument(skip(self, update))]
    pub async fn update_user(
        &self,
        id: UserId,
        update: UserUpdate,
    ) -> Result<User, WakeHubError> {
        let mut user = self.get_user(id).await?;
        user.full_name = update.full_name;
        user.email = update.email;
        user.phone = update.phone;
        user.role = update.role;
        if !update.password.is_empty() {
            user.password_hash = self.hasher.hash(&update.password)?;
        }
        user.validate()?;
        self.repo.update(user).await
    }

    /// Apply a self-service profile edit.
    ///
    /// # Errors
    ///
    /// Returns [`WakeHubError::Validation`] when required fields are empty,
    /// the email is malformed, or the password confirmation differs;
    /// [`WakeHubError::NotFound`] for an unknown username; or a storage
    /// error.
    #[tracing::instrument(skip(self, update))]
    pub async fn update_profile(
        &self,
        username: &str,
        update: ProfileUpdate,
    ) -> Result<User, WakeHubError> {
        let mut user = self.get_by_username(username).await?;
        user.full_name = update.full_name;
        user.email = update.email;
        user.phone = update.phone;
        if !update.password.is_empty() || !update.password_confirm.is_empty() {
            if update.password != update.password_confirm {
                return Err(ValidationError::PasswordMismatch.into());
            }
            user.password_hash = self.hasher.hash(&update.password)?;
        }
        user.validate()?;
        self.repo.update(user).await
    }

    /// Delete a user by id.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_user(&self, id: UserId) -> Result<(), WakeHubError> {
        self.repo.delete(id).await
    }
}
