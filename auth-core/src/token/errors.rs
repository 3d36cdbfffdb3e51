use thiserror::Error;

use super::claims::TokenKind;

/// Error type for token minting and verification.
///
/// The three rejection cases are split for diagnostics only; callers that do
/// not need the distinction collapse them into a single opaque invalid-token
/// failure before anything leaves the process.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed or its signature does not verify: {0}")]
    Malformed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Wrong token kind: expected {expected}, got {actual}")]
    WrongKind {
        expected: TokenKind,
        actual: TokenKind,
    },

    #[error("Token subject is not a valid user id: {0}")]
    InvalidSubject(String),
}

/// Startup-time configuration errors. Fatal: the process must not serve
/// traffic with a configuration that fails these checks.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Signing secret must be at least {min} bytes, got {actual}")]
    MisconfiguredSecret { min: usize, actual: usize },

    #[error("Unsupported signing algorithm: {0} (expected HS256, HS384 or HS512)")]
    UnsupportedAlgorithm(String),

    #[error("Token TTL must be positive: {0}")]
    NonPositiveTtl(&'static str),
}
