use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::PageParams;
use crate::inbound::http::handlers::PaginationMeta;
use crate::inbound::http::handlers::PostBody;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// The caller's feed: their own posts plus posts from everyone they follow,
/// newest first.
pub async fn get_timeline(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Query(params): Query<PageParams>,
) -> Result<ApiSuccess<TimelineResponseData>, ApiError> {
    let page = state
        .post_service
        .timeline(&auth_user.user_id, params.to_request())
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        TimelineResponseData {
            posts: page.items.iter().map(PostBody::from).collect(),
            pagination: PaginationMeta::from(&page),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineResponseData {
    pub posts: Vec<PostBody>,
    pub pagination: PaginationMeta,
}
