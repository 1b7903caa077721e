//! User — an operator account with a role.

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, WakeHubError};
use crate::id::UserId;

/// Access level of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// May manage user accounts in addition to everything else.
    Admin,
    /// Regular operator.
    User,
}

impl Role {
    /// Stable lowercase name, as stored in the database.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    /// Parse a form or database value, defaulting to [`Role::User`] for
    /// anything unrecognised.
    #[must_use]
    pub fn parse_lossy(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("admin") {
            Self::Admin
        } else {
            Self::User
        }
    }
}

/// An operator account.
///
/// `password_hash` holds an Argon2id PHC string and is never serialised.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub role: Role,
}

impl User {
    /// Create a builder for constructing a [`User`].
    #[must_use]
    pub fn builder() -> UserBuilder {
        UserBuilder::default()
    }

    /// Whether this account may manage users.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`WakeHubError::Validation`] when a required field is empty
    /// or the email does not look like an address.
    pub fn validate(&self) -> Result<(), WakeHubError> {
        if self.full_name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.username.is_empty() {
            return Err(ValidationError::EmptyUsername.into());
        }
        if self.phone.is_empty() {
            return Err(ValidationError::EmptyPhone.into());
        }
        if !email_is_valid(&self.email) {
            return Err(ValidationError::InvalidEmail.into());
        }
        Ok(())
    }
}

/// Shape check for email addresses: `local@host.rest` with the character
/// classes the login form advertises.
fn email_is_valid(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let Some((host, rest)) = domain.split_once('.') else {
        return false;
    };
    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '+' | '-'));
    let host_ok = !host.is_empty()
        && host.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
    let rest_ok = !rest.is_empty()
        && rest
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.'));
    local_ok && host_ok && rest_ok
}

/// Step-by-step builder for [`User`].
#[derive(Debug, Default)]
pub struct UserBuilder {
    id: Option<UserId>,
    full_name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    username: Option<String>,
    password_hash: Option<String>,
    role: Option<Role>,
}

impl UserBuilder {
    #[must_use]
    pub fn id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    #[must_use]
    pub fn password_hash(mut self, password_hash: impl Into<String>) -> Self {
        self.password_hash = Some(password_hash.into());
        self
    }

    #[must_use]
    pub fn role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Consume the builder, validate, and return a [`User`].
    ///
    /// # Errors
    ///
    /// Returns [`WakeHubError::Validation`] if a required field is missing
    /// or invalid.
    pub fn build(self) -> Result<User, WakeHubError> {
        let user = User {
            id: self.id.unwrap_or_default(),
            full_name: self.full_name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            username: self.username.unwrap_or_default(),
            password_hash: self.password_hash.unwrap_or_default(),
            role: self.role.unwrap_or(Role::User),
        };
        user.validate()?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WakeHubError;

    fn valid_builder() -> UserBuilder {
        User::builder()
            .full_name("Ada Lovelace")
            .email("ada@example.org")
            .phone("555-0100")
            .username("ada")
            .password_hash("$argon2id$stub")
    }

    #[test]
    fn should_build_valid_user_with_default_role() {
        let user = valid_builder().build().unwrap();
        assert_eq!(user.username, "ada");
        assert_eq!(user.role, Role::User);
        assert!(!user.is_admin());
    }

    #[test]
    fn should_build_admin_when_role_given() {
        let user = valid_builder().role(Role::Admin).build().unwrap();
        assert!(user.is_admin());
    }

    #[test]
    fn should_reject_empty_full_name() {
        let result = User::builder()
            .email("ada@example.org")
            .phone("555-0100")
            .username("ada")
            .build();
        assert!(matches!(
            result,
            Err(WakeHubError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_reject_malformed_email() {
        let result = valid_builder().email("not-an-email").build();
        assert!(matches!(
            result,
            Err(WakeHubError::Validation(ValidationError::InvalidEmail))
        ));
    }

    #[test]
    fn should_accept_plus_tagged_email() {
        assert!(valid_builder().email("ada+wol@example.org").build().is_ok());
    }

    #[test]
    fn should_reject_email_without_domain_dot() {
        let result = valid_builder().email("ada@localhost").build();
        assert!(matches!(
            result,
            Err(WakeHubError::Validation(ValidationError::InvalidEmail))
        ));
    }

    #[test]
    fn should_parse_role_lossily() {
        assert_eq!(Role::parse_lossy("admin"), Role::Admin);
        assert_eq!(Role::parse_lossy(" ADMIN "), Role::Admin);
        assert_eq!(Role::parse_lossy("user"), Role::User);
        assert_eq!(Role::parse_lossy("superuser"), Role::User);
    }

    #[test]
    fn should_not_serialise_password_hash() {
        let user = valid_builder().build().unwrap();
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("$argon2id$stub"));
    }
}
