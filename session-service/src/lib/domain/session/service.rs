use std::sync::Arc;

use async_trait::async_trait;
use auth_core::PasswordHasher;
use auth_core::TokenCodec;
use auth_core::TokenKind;
use chrono::Utc;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::EmailAddress;
use crate::domain::session::models::TokenPair;
use crate::domain::session::models::UserId;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::session::ports::UserStore;

/// Fixed Argon2id hash verified when no account matches the submitted email,
/// so the unknown-email and wrong-password paths pay the same hashing cost.
/// The digest is random bytes, not derived from any password.
const UNKNOWN_USER_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$8FK63Btj7bFmgd7vDkxTMA$UH27WoD33TUts6/vGIB+7XK6RBYWGW5+GVRt4+fBxLU";

/// Session domain service.
///
/// Combines credential verification, the active-flag check, and token
/// issuance, and enforces the generic-failure policy that keeps account
/// existence unobservable from the outside.
pub struct SessionService<S>
where
    S: UserStore,
{
    store: Arc<S>,
    hasher: PasswordHasher,
    codec: TokenCodec,
}

impl<S> SessionService<S>
where
    S: UserStore,
{
    /// Create a new session service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - External user store implementation
    /// * `hasher` - Credential hasher
    /// * `codec` - Signed-token codec
    pub fn new(store: Arc<S>, hasher: PasswordHasher, codec: TokenCodec) -> Self {
        Self {
            store,
            hasher,
            codec,
        }
    }

    /// Run the memory-hard verification off the cooperative scheduler.
    ///
    /// A corrupt stored hash is reported as a failed verification; it must
    /// not be distinguishable from a wrong password by an external observer.
    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, SessionError> {
        let hasher = self.hasher.clone();
        let password = password.to_owned();
        let hash = hash.to_owned();

        let outcome = tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| SessionError::Unknown(format!("Verification task failed: {}", e)))?;

        match outcome {
            Ok(matched) => Ok(matched),
            Err(e) => {
                tracing::warn!(error = %e, "password verification error");
                Ok(false)
            }
        }
    }
}

#[async_trait]
impl<S> SessionServicePort for SessionService<S>
where
    S: UserStore,
{
    async fn login(&self, email: &str, password: &str) -> Result<TokenPair, SessionError> {
        let record = match EmailAddress::new(email.to_owned()) {
            Ok(email) => self.store.find_by_email(&email).await?,
            Err(_) => None,
        };

        let user = match record {
            Some(user) => user,
            None => {
                // Same hashing cost and the same failure as a wrong
                // password, so the response does not reveal whether the
                // account exists.
                let _ = self.verify_password(password, UNKNOWN_USER_HASH).await?;
                return Err(SessionError::InvalidCredentials);
            }
        };

        let verified = self.verify_password(password, &user.password_hash).await?;
        if !verified {
            return Err(SessionError::InvalidCredentials);
        }

        if !user.is_active {
            return Err(SessionError::AccountInactive);
        }

        let now = Utc::now();
        let access_token = self
            .codec
            .mint(user.id.0, TokenKind::Access, now)
            .map_err(|e| SessionError::Unknown(format!("Token minting failed: {}", e)))?;
        let refresh_token = self
            .codec
            .mint(user.id.0, TokenKind::Refresh, now)
            .map_err(|e| SessionError::Unknown(format!("Token minting failed: {}", e)))?;

        tracing::debug!(user_id = %user.id, "login succeeded");

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, SessionError> {
        let now = Utc::now();

        // Malformed, expired and wrong-kind all collapse into the same
        // caller-facing failure; the split exists for diagnostics.
        let claims = self
            .codec
            .verify(refresh_token, TokenKind::Refresh, now)
            .map_err(|e| {
                tracing::debug!(error = %e, "refresh token rejected");
                SessionError::InvalidRefreshToken
            })?;

        let user_id = claims.subject().map(UserId).map_err(|e| {
            tracing::debug!(error = %e, "refresh token subject rejected");
            SessionError::InvalidRefreshToken
        })?;

        // Account state is re-checked but never revealed: a deleted or
        // deactivated account fails the same way as a bad token.
        let user = match self.store.find_by_id(user_id).await? {
            Some(user) if user.is_active => user,
            _ => return Err(SessionError::InvalidRefreshToken),
        };

        let access_token = self
            .codec
            .mint(user.id.0, TokenKind::Access, now)
            .map_err(|e| SessionError::Unknown(format!("Token minting failed: {}", e)))?;

        // Refresh tokens are not rotated; the caller's token is echoed back.
        Ok(TokenPair {
            access_token,
            refresh_token: refresh_token.to_owned(),
        })
    }

    async fn authorize(&self, access_token: &str) -> Result<UserId, SessionError> {
        let claims = self
            .codec
            .verify(access_token, TokenKind::Access, Utc::now())
            .map_err(|e| {
                tracing::debug!(error = %e, "access token rejected");
                SessionError::InvalidAccessToken
            })?;

        claims.subject().map(UserId).map_err(|e| {
            tracing::debug!(error = %e, "access token subject rejected");
            SessionError::InvalidAccessToken
        })
    }
}
