use std::fmt;
use std::str::FromStr;

use auth::TokenIdentity;
use chrono::DateTime;
use chrono::Utc;

use crate::user::errors::EmailError;
use crate::user::errors::UserIdError;

/// User aggregate entity.
///
/// Represents a registered user. The password hash is opaque to this
/// layer; it is produced and checked only by the password hasher.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Snapshot of this user for embedding in a session token.
    pub fn token_identity(&self) -> TokenIdentity {
        TokenIdentity {
            id: self.id.get(),
            email: self.email.as_str().to_string(),
            name: self.name.clone(),
        }
    }
}

/// User unique identifier type.
///
/// Wraps the database-assigned integer id; only values >= 1 are valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(i64);

impl UserId {
    /// Validate a raw integer as a user id.
    ///
    /// # Errors
    /// * `OutOfRange` - Value is below 1
    pub fn new(id: i64) -> Result<Self, UserIdError> {
        if id < 1 {
            return Err(UserIdError::OutOfRange(id));
        }
        Ok(Self(id))
    }

    /// Parse a user id from its decimal string form.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a decimal integer
    /// * `OutOfRange` - Parsed value is below 1
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        let raw = i64::from_str(s).map_err(|e| UserIdError::InvalidFormat(e.to_string()))?;
        Self::new(raw)
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
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

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Transient email/password pair for one authentication attempt.
///
/// The email stays a raw string here: an address that fails validation
/// must be indistinguishable from one that simply is not registered.
/// Never persisted, never logged.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Command to register a new user with domain types
#[derive(Debug)]
pub struct CreateUserCommand {
    pub email: EmailAddress,
    pub password: String,
}

impl CreateUserCommand {
    pub fn new(email: EmailAddress, password: String) -> Self {
        Self { email, password }
    }
}

/// Command to update an existing user.
///
/// Only the display name is mutable through the public API; credentials
/// change through dedicated flows.
#[derive(Debug)]
pub struct UpdateUserCommand {
    pub name: Option<String>,
}

/// New user row awaiting a database-assigned id.
#[derive(Debug)]
pub struct NewUser {
    pub email: EmailAddress,
    pub name: String,
    pub password_hash: String,
}
