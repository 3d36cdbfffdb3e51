use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid user id: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for user-store lookups.
///
/// Transient store failures propagate to the caller unchanged; the core
/// never retries.
#[derive(Debug, Clone, Error)]
pub enum UserStoreError {
    #[error("Database error: {0}")]
    Database(String),
}

/// Caller-facing failure kinds for session operations.
///
/// `InvalidCredentials` carries one fixed message for both the unknown-email
/// and wrong-password cases; the two must stay indistinguishable to an
/// external observer. Account inactivity is not a secret and gets its own
/// kind. Refresh failures are likewise collapsed into a single generic kind
/// regardless of whether the token was malformed, expired, or of the wrong
/// kind.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Inactive user account")]
    AccountInactive,

    #[error("Invalid or expired refresh token")]
    InvalidRefreshToken,

    #[error("Invalid or expired token")]
    InvalidAccessToken,

    #[error("User store error: {0}")]
    Store(#[from] UserStoreError),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
