use async_trait::async_trait;

use crate::domain::page::PageRequest;
use crate::domain::page::Paginated;
use crate::post::errors::PostError;
use crate::post::models::CreatePostCommand;
use crate::post::models::Post;
use crate::post::models::PostId;
use crate::user::models::UserId;

/// Persistence operations for posts.
#[async_trait]
pub trait PostRepository: Send + Sync + 'static {
    /// Persist a new post and return it joined with author fields.
    async fn create(&self, author: &UserId, command: &CreatePostCommand)
        -> Result<Post, PostError>;

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostError>;

    /// Posts by one author, newest first.
    async fn list_by_user(
        &self,
        user_id: &UserId,
        page: PageRequest,
    ) -> Result<Paginated<Post>, PostError>;

    /// The user's own posts unioned with posts from users they follow,
    /// newest first.
    async fn list_timeline(
        &self,
        user_id: &UserId,
        page: PageRequest,
    ) -> Result<Paginated<Post>, PostError>;

    /// Delete a post only if `owner` matches; returns whether a row was
    /// removed.
    async fn delete_owned(&self, id: &PostId, owner: &UserId) -> Result<bool, PostError>;
}
