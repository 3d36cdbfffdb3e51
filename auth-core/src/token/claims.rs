use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use super::errors::TokenError;

/// Token kind tag carried in every claim set.
///
/// Exactly one of two variants, never absent: access tokens gate protected
/// resources, refresh tokens only mint new access tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Access => write!(f, "access"),
            TokenKind::Refresh => write!(f, "refresh"),
        }
    }
}

/// Signed-token claim set.
///
/// `sub` is serialized as text (wire-format requirement of the signing
/// scheme) but represents an integer user identifier; use
/// [`Claims::subject`] to parse it back before use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: user identifier as a decimal string
    pub sub: String,

    /// Expiration time (Unix timestamp); tokens are valid on `[iat, exp)`
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Token kind
    #[serde(rename = "type")]
    pub kind: TokenKind,
}

impl Claims {
    /// Parse the subject back into the integer user identifier it encodes.
    ///
    /// # Errors
    /// * `InvalidSubject` - `sub` is not a decimal integer
    pub fn subject(&self) -> Result<i64, TokenError> {
        self.sub
            .parse::<i64>()
            .map_err(|_| TokenError::InvalidSubject(self.sub.clone()))
    }
}
