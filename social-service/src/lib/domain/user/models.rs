use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::user::errors::EmailError;
use crate::user::errors::UsernameError;

/// User aggregate entity.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User unique identifier, assigned by the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type.
///
/// 3-50 characters, alphanumeric plus underscore and hyphen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 50;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` / `TooLong` - Length outside 3-50 characters
    /// * `InvalidCharacters` - Contains characters other than alphanumeric,
    ///   underscore, and hyphen
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let length = username.len();
        if length < Self::MIN_LENGTH {
            return Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        if length > Self::MAX_LENGTH {
            return Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        if !username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            return Err(UsernameError::InvalidCharacters);
        }

        Ok(Self(username))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address value type, RFC 5322 validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Command to register a new user with validated fields.
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub password: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
}

/// Row to persist after the service has hashed the password.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
}

/// Command to update profile fields. Absent fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileCommand {
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_accepts_valid_input() {
        let username = Username::new("alice_42".to_string()).unwrap();
        assert_eq!(username.as_str(), "alice_42");
    }

    #[test]
    fn username_rejects_bad_lengths() {
        assert!(matches!(
            Username::new("ab".to_string()),
            Err(UsernameError::TooShort { .. })
        ));
        assert!(matches!(
            Username::new("x".repeat(51)),
            Err(UsernameError::TooLong { .. })
        ));
    }

    #[test]
    fn username_rejects_invalid_characters() {
        assert!(matches!(
            Username::new("alice smith".to_string()),
            Err(UsernameError::InvalidCharacters)
        ));
    }

    #[test]
    fn email_validation() {
        assert!(EmailAddress::new("alice@example.com".to_string()).is_ok());
        assert!(EmailAddress::new("not-an-email".to_string()).is_err());
    }
}
