use axum::http::StatusCode;
use axum::Extension;

use crate::inbound::http::middleware::AuthenticatedUser;

/// Stateless logout: there is no server-side session to clear, so issued
/// tokens stay valid until natural expiry. The route is gated by the bearer
/// middleware; reaching it at all requires a currently-valid access token.
/// Clients discard their tokens.
pub async fn logout(Extension(user): Extension<AuthenticatedUser>) -> StatusCode {
    tracing::debug!(user_id = %user.user_id, "logout");

    StatusCode::NO_CONTENT
}
