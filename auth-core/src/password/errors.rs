use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// The stored hash is not a parseable PHC string. Callers must treat
    /// this exactly like a failed verification.
    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),

    #[error("Invalid hasher parameters: {0}")]
    InvalidParams(String),
}
