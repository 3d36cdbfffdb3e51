use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::session::models::UserId;
use crate::domain::session::ports::SessionServicePort;
use crate::inbound::http::router::AppState;

/// Extension type carrying the authenticated user ID in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware gating protected routes on a valid bearer access token.
///
/// Authorization is a pure token check (signature, expiry, kind); no user
/// store lookup happens here.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let user_id = state.session_service.authorize(token).await.map_err(|e| {
        tracing::warn!(error = %e, "access token rejected");
        ApiError::from(e).into_response()
    })?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| {
            ApiError::Unauthorized("Missing Authorization header".to_string()).into_response()
        })?;

    let auth_str = auth_header.to_str().map_err(|_| {
        ApiError::Unauthorized("Invalid Authorization header".to_string()).into_response()
    })?;

    if !auth_str.starts_with("Bearer ") {
        return Err(ApiError::Unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
        )
        .into_response());
    }

    Ok(auth_str.trim_start_matches("Bearer "))
}
