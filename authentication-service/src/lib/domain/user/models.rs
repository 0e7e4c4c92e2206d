use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::EmailError;
use crate::user::errors::PasswordRuleError;
use crate::user::errors::RoleNameError;
use crate::user::errors::UserIdError;
use crate::user::errors::UsernameError;

/// User aggregate entity.
///
/// Represents a registered account together with its assigned roles.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
    pub roles: Vec<Role>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Canonical names of the assigned roles, sorted for stable output.
    pub fn role_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .roles
            .iter()
            .map(|role| role.name.as_str().to_string())
            .collect();
        names.sort();
        names
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Ensures username is 3-32 characters and contains only alphanumeric, underscore, and hyphen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 32;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 3 characters
    /// * `TooLong` - Username longer than 32 characters
    /// * `InvalidCharacters` - Contains non-alphanumeric characters (except _ and -)
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.len();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            Ok(username)
        } else {
            Err(UsernameError::InvalidCharacters)
        }
    }

    /// Get username as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Role entity: a named authorization grant shared by many users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: RoleId,
    pub name: RoleName,
}

/// Role unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoleId(pub Uuid);

impl RoleId {
    /// Generate a new random role ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Canonical role names. The set is fixed; rows are created lazily the
/// first time a name is referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleName {
    User,
    Moderator,
    Admin,
}

impl RoleName {
    /// Canonical name as persisted and embedded in tokens.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::User => "ROLE_USER",
            RoleName::Moderator => "ROLE_MODERATOR",
            RoleName::Admin => "ROLE_ADMIN",
        }
    }

    /// Map a requested role name from a signup payload.
    ///
    /// Unrecognized names fall back to the default role rather than failing
    /// the registration.
    pub fn from_request(requested: &str) -> Self {
        match requested {
            "admin" => RoleName::Admin,
            "moderator" => RoleName::Moderator,
            _ => RoleName::User,
        }
    }
}

impl FromStr for RoleName {
    type Err = RoleNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ROLE_USER" => Ok(RoleName::User),
            "ROLE_MODERATOR" => Ok(RoleName::Moderator),
            "ROLE_ADMIN" => Ok(RoleName::Admin),
            other => Err(RoleNameError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Command to register a new user with domain types.
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub password: String,
    pub roles: Option<HashSet<String>>,
}

impl RegisterUserCommand {
    const MIN_PASSWORD_LENGTH: usize = 6;
    const MAX_PASSWORD_LENGTH: usize = 128;

    /// Construct a new registration command.
    ///
    /// Username and email arrive already validated; the password rule is
    /// enforced here since the command is the only place the plaintext
    /// exists as a domain value.
    ///
    /// # Errors
    /// * `TooShort` / `TooLong` - Password length outside the allowed range
    pub fn new(
        username: Username,
        email: EmailAddress,
        password: String,
        roles: Option<HashSet<String>>,
    ) -> Result<Self, PasswordRuleError> {
        let length = password.len();
        if length < Self::MIN_PASSWORD_LENGTH {
            return Err(PasswordRuleError::TooShort {
                min: Self::MIN_PASSWORD_LENGTH,
                actual: length,
            });
        }
        if length > Self::MAX_PASSWORD_LENGTH {
            return Err(PasswordRuleError::TooLong {
                max: Self::MAX_PASSWORD_LENGTH,
                actual: length,
            });
        }

        Ok(Self {
            username,
            email,
            password,
            roles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_name_from_request() {
        assert_eq!(RoleName::from_request("admin"), RoleName::Admin);
        assert_eq!(RoleName::from_request("moderator"), RoleName::Moderator);
        assert_eq!(RoleName::from_request("user"), RoleName::User);
        assert_eq!(RoleName::from_request("bogus"), RoleName::User);
        assert_eq!(RoleName::from_request(""), RoleName::User);
    }

    #[test]
    fn test_role_name_round_trip() {
        for name in [RoleName::User, RoleName::Moderator, RoleName::Admin] {
            assert_eq!(name.as_str().parse::<RoleName>().unwrap(), name);
        }
        assert!("SUPERUSER".parse::<RoleName>().is_err());
    }

    #[test]
    fn test_register_command_rejects_short_password() {
        let username = Username::new("alice".to_string()).unwrap();
        let email = EmailAddress::new("alice@example.com".to_string()).unwrap();

        let result = RegisterUserCommand::new(username, email, "short".to_string(), None);
        assert!(matches!(result, Err(PasswordRuleError::TooShort { .. })));
    }
}
