use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Username;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::UserBody;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    let command = body.try_into_command()?;

    let user = state.user_service.register(command).await?;
    let token = state.token_issuer.issue(user.id.0, user.username.as_str())?;

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        RegisterResponseData {
            token,
            user: UserBody::from(&user),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    username: String,
    email: String,
    password: String,
    display_name: Option<String>,
    bio: Option<String>,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterUserCommand, ApiError> {
        if self.password.is_empty() {
            return Err(ApiError::BadRequest(
                "Username, email, and password are required".to_string(),
            ));
        }

        let username = Username::new(self.username)
            .map_err(|e| ApiError::BadRequest(format!("Invalid username: {}", e)))?;
        let email = EmailAddress::new(self.email)
            .map_err(|e| ApiError::BadRequest(format!("Invalid email: {}", e)))?;

        Ok(RegisterUserCommand {
            username,
            email,
            password: self.password,
            display_name: self.display_name,
            bio: self.bio,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub token: String,
    pub user: UserBody,
}
