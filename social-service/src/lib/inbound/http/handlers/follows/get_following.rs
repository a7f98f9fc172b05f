use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use crate::domain::user::models::Username;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::FollowEdgeBody;
use crate::inbound::http::handlers::PageParams;
use crate::inbound::http::handlers::PaginationMeta;
use crate::inbound::http::router::AppState;

pub async fn get_following(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<ApiSuccess<FollowingResponseData>, ApiError> {
    let username = Username::new(username)
        .map_err(|_| ApiError::NotFound("User not found".to_string()))?;

    let page = state
        .follow_service
        .following(&username, params.to_request())
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        FollowingResponseData {
            following: page.items.iter().map(FollowEdgeBody::from).collect(),
            pagination: PaginationMeta::from(&page),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FollowingResponseData {
    pub following: Vec<FollowEdgeBody>,
    pub pagination: PaginationMeta,
}
