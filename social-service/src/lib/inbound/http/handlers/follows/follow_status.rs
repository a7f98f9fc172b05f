use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use crate::domain::user::models::Username;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn follow_status(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(username): Path<String>,
) -> Result<ApiSuccess<FollowStatusResponseData>, ApiError> {
    let username = Username::new(username)
        .map_err(|_| ApiError::NotFound("User not found".to_string()))?;

    let is_following = state
        .follow_service
        .follow_status(&auth_user.user_id, &username)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        FollowStatusResponseData { is_following },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FollowStatusResponseData {
    #[serde(rename = "isFollowing")]
    pub is_following: bool,
}
