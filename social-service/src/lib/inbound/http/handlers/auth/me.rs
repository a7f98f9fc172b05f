use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::UserBody;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Current account plus which mechanism authenticated the request.
pub async fn me(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<MeResponseData>, ApiError> {
    let user = state.user_service.get_user(&auth_user.user_id).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MeResponseData {
            user: UserBody::from(&user),
            auth_method: auth_user.method.as_str().to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeResponseData {
    pub user: UserBody,
    #[serde(rename = "authMethod")]
    pub auth_method: String,
}
