use std::sync::Arc;

use crate::domain::page::PageRequest;
use crate::domain::page::Paginated;
use crate::follow::errors::FollowError;
use crate::follow::models::FollowEdge;
use crate::follow::ports::FollowRepository;
use crate::user::errors::UserError;
use crate::user::models::User;
use crate::user::models::UserId;
use crate::user::models::Username;
use crate::user::ports::UserRepository;

/// Domain service for the follow graph.
pub struct FollowService<FR, UR>
where
    FR: FollowRepository,
    UR: UserRepository,
{
    follows: Arc<FR>,
    users: Arc<UR>,
}

impl<FR, UR> FollowService<FR, UR>
where
    FR: FollowRepository,
    UR: UserRepository,
{
    pub fn new(follows: Arc<FR>, users: Arc<UR>) -> Self {
        Self { follows, users }
    }

    /// Follow the named user.
    ///
    /// # Errors
    /// * `UserNotFound` - Target username does not exist
    /// * `SelfFollow` - Caller and target are the same user
    /// * `AlreadyFollowing` - Edge already exists
    pub async fn follow(
        &self,
        follower: &UserId,
        target_username: &Username,
    ) -> Result<(), FollowError> {
        let target = self.resolve_target(target_username).await?;

        if *follower == target.id {
            return Err(FollowError::SelfFollow);
        }

        if self.follows.exists(follower, &target.id).await? {
            return Err(FollowError::AlreadyFollowing(target_username.to_string()));
        }

        self.follows.create(follower, &target.id).await?;

        tracing::info!(
            follower_id = %follower,
            following_id = %target.id,
            "Follow created"
        );

        Ok(())
    }

    /// Unfollow the named user.
    ///
    /// # Errors
    /// * `UserNotFound` - Target username does not exist
    /// * `NotFollowing` - No edge to remove
    pub async fn unfollow(
        &self,
        follower: &UserId,
        target_username: &Username,
    ) -> Result<(), FollowError> {
        let target = self.resolve_target(target_username).await?;

        if !self.follows.delete(follower, &target.id).await? {
            return Err(FollowError::NotFollowing(target_username.to_string()));
        }

        tracing::info!(
            follower_id = %follower,
            following_id = %target.id,
            "Follow removed"
        );

        Ok(())
    }

    pub async fn followers(
        &self,
        username: &Username,
        page: PageRequest,
    ) -> Result<Paginated<FollowEdge>, FollowError> {
        let user = self.resolve_target(username).await?;
        self.follows.list_followers(&user.id, page).await
    }

    pub async fn following(
        &self,
        username: &Username,
        page: PageRequest,
    ) -> Result<Paginated<FollowEdge>, FollowError> {
        let user = self.resolve_target(username).await?;
        self.follows.list_following(&user.id, page).await
    }

    /// Whether `follower` currently follows the named user.
    pub async fn follow_status(
        &self,
        follower: &UserId,
        target_username: &Username,
    ) -> Result<bool, FollowError> {
        let target = self.resolve_target(target_username).await?;
        self.follows.exists(follower, &target.id).await
    }

    async fn resolve_target(&self, username: &Username) -> Result<User, FollowError> {
        self.users
            .find_by_username(username)
            .await
            .map_err(|err| match err {
                UserError::DatabaseError(message) => FollowError::DatabaseError(message),
                other => FollowError::DatabaseError(other.to_string()),
            })?
            .ok_or_else(|| FollowError::UserNotFound(username.to_string()))
    }
}
