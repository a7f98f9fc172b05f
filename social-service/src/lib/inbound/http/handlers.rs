use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use serde_json::json;

use crate::domain::page::PageRequest;
use crate::domain::page::Paginated;
use crate::follow::errors::FollowError;
use crate::follow::models::FollowEdge;
use crate::post::errors::PostError;
use crate::post::models::Post;
use crate::user::errors::UserError;
use crate::user::models::User;

pub mod auth;
pub mod follows;
pub mod health;
pub mod posts;
pub mod users;

/// Successful response: a status code and a plain JSON body.
#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize>(StatusCode, Json<T>);

impl<T: Serialize> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Failed response. Every variant serializes as `{"error": "..."}` with the
/// matching status code; internal errors are logged and redacted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidUsername(_) | UserError::InvalidEmail(_) => {
                ApiError::BadRequest(err.to_string())
            }
            UserError::NotFound(_) | UserError::NotFoundByUsername(_) => {
                ApiError::NotFound("User not found".to_string())
            }
            UserError::UsernameAlreadyExists(_) | UserError::EmailAlreadyExists(_) => {
                ApiError::Conflict(err.to_string())
            }
            UserError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            UserError::Password(_) | UserError::DatabaseError(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<PostError> for ApiError {
    fn from(err: PostError) -> Self {
        match err {
            PostError::EmptyContent => ApiError::BadRequest(err.to_string()),
            PostError::NotFound(_) => ApiError::NotFound("Post not found".to_string()),
            PostError::NotFoundOrNotOwned => ApiError::NotFound(err.to_string()),
            PostError::UserNotFound(_) => ApiError::NotFound("User not found".to_string()),
            PostError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<FollowError> for ApiError {
    fn from(err: FollowError) -> Self {
        match err {
            FollowError::UserNotFound(_) => ApiError::NotFound("User not found".to_string()),
            FollowError::SelfFollow => ApiError::BadRequest(err.to_string()),
            FollowError::AlreadyFollowing(_) => ApiError::Conflict(err.to_string()),
            FollowError::NotFollowing(_) => ApiError::NotFound(err.to_string()),
            FollowError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<::auth::TokenError> for ApiError {
    fn from(err: ::auth::TokenError) -> Self {
        ApiError::InternalServerError(err.to_string())
    }
}

impl From<::auth::ResolveError> for ApiError {
    fn from(err: ::auth::ResolveError) -> Self {
        match err {
            ::auth::ResolveError::MissingCredentials(msg) => {
                ApiError::Unauthorized(msg.to_string())
            }
            ::auth::ResolveError::InvalidCredentials(msg) => ApiError::Forbidden(msg.to_string()),
        }
    }
}

/// Simple `{"message": "..."}` body for operations with nothing to return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Raw `?page=&limit=` query parameters.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageParams {
    pub fn to_request(self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}

/// Pagination envelope attached to every list response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> From<&Paginated<T>> for PaginationMeta {
    fn from(page: &Paginated<T>) -> Self {
        Self {
            page: page.page,
            limit: page.limit,
            total: page.total,
            pages: page.pages(),
            has_next: page.has_next(),
            has_prev: page.has_prev(),
        }
    }
}

/// Full user representation, returned to the account owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserBody {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserBody {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            username: user.username.to_string(),
            email: user.email.as_str().to_string(),
            display_name: user.display_name.clone(),
            bio: user.bio.clone(),
            avatar_url: user.avatar_url.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Public user representation; omits the email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicUserBody {
    pub id: i64,
    pub username: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for PublicUserBody {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            username: user.username.to_string(),
            display_name: user.display_name.clone(),
            bio: user.bio.clone(),
            avatar_url: user.avatar_url.clone(),
            created_at: user.created_at,
        }
    }
}

/// Post with the author's public fields flattened in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostBody {
    pub id: i64,
    pub user_id: i64,
    pub content: String,
    pub media_url: Option<String>,
    pub media_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub username: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

impl From<&Post> for PostBody {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.0,
            user_id: post.user_id.0,
            content: post.content.clone(),
            media_url: post.media_url.clone(),
            media_type: post.media_type.clone(),
            created_at: post.created_at,
            updated_at: post.updated_at,
            username: post.author.username.clone(),
            display_name: post.author.display_name.clone(),
            avatar_url: post.author.avatar_url.clone(),
        }
    }
}

/// One entry of a followers/following listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FollowEdgeBody {
    pub id: i64,
    pub username: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub followed_at: DateTime<Utc>,
}

impl From<&FollowEdge> for FollowEdgeBody {
    fn from(edge: &FollowEdge) -> Self {
        Self {
            id: edge.user_id.0,
            username: edge.username.clone(),
            display_name: edge.display_name.clone(),
            avatar_url: edge.avatar_url.clone(),
            followed_at: edge.followed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_errors_are_redacted() {
        let response =
            ApiError::InternalServerError("connection refused".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn user_errors_map_to_expected_statuses() {
        assert!(matches!(
            ApiError::from(UserError::InvalidCredentials),
            ApiError::Unauthorized(_)
        ));
        assert!(matches!(
            ApiError::from(UserError::UsernameAlreadyExists("alice".to_string())),
            ApiError::Conflict(_)
        ));
        assert!(matches!(
            ApiError::from(UserError::NotFoundByUsername("ghost".to_string())),
            ApiError::NotFound(_)
        ));
    }

    #[test]
    fn follow_errors_map_to_expected_statuses() {
        assert!(matches!(
            ApiError::from(FollowError::SelfFollow),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from(FollowError::AlreadyFollowing("bob".to_string())),
            ApiError::Conflict(_)
        ));
        assert!(matches!(
            ApiError::from(FollowError::NotFollowing("bob".to_string())),
            ApiError::NotFound(_)
        ));
    }

    #[test]
    fn resolve_errors_split_between_401_and_403() {
        assert!(matches!(
            ApiError::from(::auth::ResolveError::MissingCredentials("x")),
            ApiError::Unauthorized(_)
        ));
        assert!(matches!(
            ApiError::from(::auth::ResolveError::InvalidCredentials("x")),
            ApiError::Forbidden(_)
        ));
    }

    #[test]
    fn pagination_meta_mirrors_the_page() {
        let page = Paginated::new(vec![1, 2, 3], PageRequest::new(Some(2), Some(3)), 7);
        let meta = PaginationMeta::from(&page);
        assert_eq!(meta.pages, 3);
        assert!(meta.has_next);
        assert!(meta.has_prev);

        let rendered = serde_json::to_value(&meta).unwrap();
        assert!(rendered.get("hasNext").is_some());
        assert!(rendered.get("hasPrev").is_some());
    }
}
