use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;

pub async fn status(
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> ApiSuccess<StatusResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        StatusResponseData {
            authenticated: true,
            method: auth_user.method.as_str().to_string(),
            user: StatusUserData {
                user_id: auth_user.user_id.0,
                username: auth_user.username,
            },
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusResponseData {
    pub authenticated: bool,
    pub method: String,
    pub user: StatusUserData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusUserData {
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub username: String,
}
