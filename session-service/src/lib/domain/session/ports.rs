use async_trait::async_trait;

use crate::domain::session::errors::SessionError;
use crate::domain::session::errors::UserStoreError;
use crate::domain::session::models::EmailAddress;
use crate::domain::session::models::TokenPair;
use crate::domain::session::models::UserId;
use crate::domain::session::models::UserRecord;

/// Port for session operations exposed to the transport layer.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Authenticate credentials and issue a fresh token pair.
    ///
    /// # Arguments
    /// * `email` - Submitted email address
    /// * `password` - Submitted plaintext password
    ///
    /// # Returns
    /// Access and refresh token for the authenticated user
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password; the two are
    ///   indistinguishable by design
    /// * `AccountInactive` - Password verified but the account is disabled
    /// * `Store` - User-store lookup failed
    async fn login(&self, email: &str, password: &str) -> Result<TokenPair, SessionError>;

    /// Exchange a refresh token for a new access token.
    ///
    /// The presented refresh token is returned verbatim alongside the new
    /// access token; refresh tokens are not rotated.
    ///
    /// # Errors
    /// * `InvalidRefreshToken` - Token malformed, expired, of the wrong
    ///   kind, or the account no longer exists or is inactive; all collapse
    ///   into this one kind
    /// * `Store` - User-store lookup failed
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, SessionError>;

    /// Resolve a bearer access token to the user it was issued for.
    ///
    /// Pure token check: signature, expiry, kind, and subject format. No
    /// store lookup.
    ///
    /// # Errors
    /// * `InvalidAccessToken` - Any verification failure
    async fn authorize(&self, access_token: &str) -> Result<UserId, SessionError>;
}

/// Read-only lookup contract owned by the external user store.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Retrieve a user record by email address.
    ///
    /// # Errors
    /// * `Database` - Lookup failed
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserRecord>, UserStoreError>;

    /// Retrieve a user record by identifier.
    ///
    /// # Errors
    /// * `Database` - Lookup failed
    async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, UserStoreError>;
}
