use std::fmt;
use std::str::FromStr;

use crate::session::errors::EmailError;
use crate::session::errors::UserIdError;

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

impl UserId {
    /// Parse a user ID from its decimal string form.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a decimal integer
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        s.parse::<i64>()
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
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

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// User record as read from the external user store.
///
/// The store owns persistence; this core reads the record through the lookup
/// contract and never mutates it.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: UserId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub is_active: bool,
}

/// Access and refresh token issued together at login.
///
/// The two tokens are independently signed and independently expiring;
/// they are paired only by carrying the same subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}
