use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::post::models::PostId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::MessageBody;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn delete_post(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<ApiSuccess<MessageBody>, ApiError> {
    state
        .post_service
        .delete_post(&PostId(id), &auth_user.user_id)
        .await
        .map_err(ApiError::from)
        .map(|()| ApiSuccess::new(StatusCode::OK, MessageBody::new("Post deleted successfully")))
}
