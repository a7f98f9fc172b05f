use async_trait::async_trait;

use crate::domain::page::PageRequest;
use crate::domain::page::Paginated;
use crate::follow::errors::FollowError;
use crate::follow::models::FollowEdge;
use crate::user::models::UserId;

/// Persistence operations for the follow graph.
#[async_trait]
pub trait FollowRepository: Send + Sync + 'static {
    /// Insert a follower → following edge.
    ///
    /// The service pre-checks self-follow and duplicates; the database
    /// constraints back those checks up under concurrency, and violations
    /// are mapped to the same errors.
    async fn create(&self, follower: &UserId, following: &UserId) -> Result<(), FollowError>;

    /// Remove an edge; returns whether one existed.
    async fn delete(&self, follower: &UserId, following: &UserId) -> Result<bool, FollowError>;

    async fn exists(&self, follower: &UserId, following: &UserId) -> Result<bool, FollowError>;

    /// Users following `user_id`, most recent first.
    async fn list_followers(
        &self,
        user_id: &UserId,
        page: PageRequest,
    ) -> Result<Paginated<FollowEdge>, FollowError>;

    /// Users `user_id` follows, most recent first.
    async fn list_following(
        &self,
        user_id: &UserId,
        page: PageRequest,
    ) -> Result<Paginated<FollowEdge>, FollowError>;
}
