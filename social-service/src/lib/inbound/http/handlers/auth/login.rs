use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::UserBody;
use crate::inbound::http::router::AppState;

/// Log in and receive a JWT. The `username` field also matches the account's
/// email address.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    body.validate()?;

    let user = state
        .user_service
        .verify_credentials(&body.username, &body.password)
        .await?;

    let token = state.token_issuer.issue(user.id.0, user.username.as_str())?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            token,
            user: UserBody::from(&user),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.username.is_empty() || self.password.is_empty() {
            return Err(ApiError::BadRequest(
                "Username and password are required".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
    pub user: UserBody,
}
