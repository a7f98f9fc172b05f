use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use crate::domain::user::models::Username;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::PageParams;
use crate::inbound::http::handlers::PaginationMeta;
use crate::inbound::http::handlers::PostBody;
use crate::inbound::http::router::AppState;

pub async fn get_user_posts(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<ApiSuccess<UserPostsResponseData>, ApiError> {
    let username = Username::new(username)
        .map_err(|_| ApiError::NotFound("User not found".to_string()))?;

    let page = state
        .post_service
        .list_user_posts(&username, params.to_request())
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        UserPostsResponseData {
            posts: page.items.iter().map(PostBody::from).collect(),
            pagination: PaginationMeta::from(&page),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserPostsResponseData {
    pub posts: Vec<PostBody>,
    pub pagination: PaginationMeta,
}
