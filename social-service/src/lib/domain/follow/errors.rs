use thiserror::Error;

/// Top-level error for all follow-graph operations
#[derive(Debug, Clone, Error)]
pub enum FollowError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Cannot follow yourself")]
    SelfFollow,

    #[error("Already following this user")]
    AlreadyFollowing(String),

    #[error("Not following this user")]
    NotFollowing(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
