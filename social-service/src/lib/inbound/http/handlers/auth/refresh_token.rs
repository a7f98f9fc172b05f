use auth::AuthMethod;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Issue a fresh JWT for a token-authenticated caller. Sessions renew on
/// their own schedule, so session callers are turned away.
pub async fn refresh_token(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<RefreshTokenResponseData>, ApiError> {
    if auth_user.method == AuthMethod::Session {
        return Err(ApiError::BadRequest(
            "Token refresh not available for session authentication".to_string(),
        ));
    }

    let token = state
        .token_issuer
        .issue(auth_user.user_id.0, &auth_user.username)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        RefreshTokenResponseData {
            token,
            message: "Token refreshed successfully".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshTokenResponseData {
    pub token: String,
    pub message: String,
}
