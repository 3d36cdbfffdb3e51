use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TokenResponseData;
use crate::domain::session::ports::SessionServicePort;
use crate::inbound::http::router::AppState;

pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequestBody>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    let pair = state.session_service.refresh(&body.refresh_token).await?;

    Ok(ApiSuccess::new(StatusCode::OK, TokenResponseData::from(pair)))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshRequestBody {
    refresh_token: String,
}
