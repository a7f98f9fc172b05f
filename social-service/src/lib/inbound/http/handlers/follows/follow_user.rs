use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::user::models::Username;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::MessageBody;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn follow_user(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(username): Path<String>,
) -> Result<ApiSuccess<MessageBody>, ApiError> {
    let username = Username::new(username)
        .map_err(|_| ApiError::NotFound("User not found".to_string()))?;

    state
        .follow_service
        .follow(&auth_user.user_id, &username)
        .await
        .map_err(ApiError::from)
        .map(|()| {
            ApiSuccess::new(
                StatusCode::CREATED,
                MessageBody::new("Successfully followed user"),
            )
        })
}
