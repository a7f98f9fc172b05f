use thiserror::Error;

/// Top-level error for all post operations
#[derive(Debug, Clone, Error)]
pub enum PostError {
    #[error("Post content is required")]
    EmptyContent,

    #[error("Post not found: {0}")]
    NotFound(i64),

    /// Delete only removes posts owned by the caller; everything else,
    /// including posts that exist but belong to someone else, is reported
    /// the same way.
    #[error("Post not found or unauthorized")]
    NotFoundOrNotOwned,

    #[error("User not found with username: {0}")]
    UserNotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
