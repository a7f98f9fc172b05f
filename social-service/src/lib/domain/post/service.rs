use std::sync::Arc;

use crate::domain::page::PageRequest;
use crate::domain::page::Paginated;
use crate::post::errors::PostError;
use crate::post::models::CreatePostCommand;
use crate::post::models::Post;
use crate::post::models::PostId;
use crate::post::ports::PostRepository;
use crate::user::errors::UserError;
use crate::user::models::UserId;
use crate::user::models::Username;
use crate::user::ports::UserRepository;

/// Domain service for post creation, retrieval and the timeline feed.
pub struct PostService<PR, UR>
where
    PR: PostRepository,
    UR: UserRepository,
{
    posts: Arc<PR>,
    users: Arc<UR>,
}

impl<PR, UR> PostService<PR, UR>
where
    PR: PostRepository,
    UR: UserRepository,
{
    pub fn new(posts: Arc<PR>, users: Arc<UR>) -> Self {
        Self { posts, users }
    }

    pub async fn create_post(
        &self,
        author: &UserId,
        command: CreatePostCommand,
    ) -> Result<Post, PostError> {
        let post = self.posts.create(author, &command).await?;
        tracing::info!(post_id = %post.id, user_id = %author, "Post created");
        Ok(post)
    }

    pub async fn get_post(&self, id: &PostId) -> Result<Post, PostError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or(PostError::NotFound(id.0))
    }

    /// Posts by the named user, newest first.
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this username
    pub async fn list_user_posts(
        &self,
        username: &Username,
        page: PageRequest,
    ) -> Result<Paginated<Post>, PostError> {
        let user = self
            .users
            .find_by_username(username)
            .await
            .map_err(user_error_to_post_error)?
            .ok_or_else(|| PostError::UserNotFound(username.to_string()))?;

        self.posts.list_by_user(&user.id, page).await
    }

    /// Timeline feed: the caller's own posts plus posts from everyone they
    /// follow, newest first.
    pub async fn timeline(
        &self,
        user_id: &UserId,
        page: PageRequest,
    ) -> Result<Paginated<Post>, PostError> {
        self.posts.list_timeline(user_id, page).await
    }

    /// Delete a post owned by the caller.
    ///
    /// # Errors
    /// * `NotFoundOrNotOwned` - Post absent or owned by someone else
    pub async fn delete_post(&self, id: &PostId, caller: &UserId) -> Result<(), PostError> {
        if !self.posts.delete_owned(id, caller).await? {
            return Err(PostError::NotFoundOrNotOwned);
        }

        tracing::info!(post_id = %id, user_id = %caller, "Post deleted");
        Ok(())
    }
}

fn user_error_to_post_error(err: UserError) -> PostError {
    match err {
        UserError::DatabaseError(message) => PostError::DatabaseError(message),
        other => PostError::DatabaseError(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::post::models::PostAuthor;
    use crate::user::models::EmailAddress;
    use crate::user::models::NewUser;
    use crate::user::models::UpdateProfileCommand;
    use crate::user::models::User;

    mock! {
        pub TestPostRepository {}

        #[async_trait::async_trait]
        impl PostRepository for TestPostRepository {
            async fn create(
                &self,
                author: &UserId,
                command: &CreatePostCommand,
            ) -> Result<Post, PostError>;
            async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostError>;
            async fn list_by_user(
                &self,
                user_id: &UserId,
                page: PageRequest,
            ) -> Result<Paginated<Post>, PostError>;
            async fn list_timeline(
                &self,
                user_id: &UserId,
                page: PageRequest,
            ) -> Result<Paginated<Post>, PostError>;
            async fn delete_owned(&self, id: &PostId, owner: &UserId) -> Result<bool, PostError>;
        }
    }

    mock! {
        pub TestUserRepository {}

        #[async_trait::async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, new_user: NewUser) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
            async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, UserError>;
            async fn update_profile(
                &self,
                id: &UserId,
                command: &UpdateProfileCommand,
            ) -> Result<Option<User>, UserError>;
        }
    }

    fn sample_post(id: i64, user_id: i64) -> Post {
        Post {
            id: PostId(id),
            user_id: UserId(user_id),
            content: "hello".to_string(),
            media_url: None,
            media_type: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            author: PostAuthor {
                username: "alice".to_string(),
                display_name: None,
                avatar_url: None,
            },
        }
    }

    fn sample_user(id: i64) -> User {
        User {
            id: UserId(id),
            username: Username::new("alice".to_string()).unwrap(),
            email: EmailAddress::new("alice@example.com".to_string()).unwrap(),
            password_hash: "$argon2id$hash".to_string(),
            display_name: None,
            bio: None,
            avatar_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn delete_of_unowned_post_fails() {
        let mut posts = MockTestPostRepository::new();
        posts
            .expect_delete_owned()
            .times(1)
            .returning(|_, _| Ok(false));

        let service = PostService::new(Arc::new(posts), Arc::new(MockTestUserRepository::new()));

        let result = service.delete_post(&PostId(1), &UserId(2)).await;
        assert!(matches!(result, Err(PostError::NotFoundOrNotOwned)));
    }

    #[tokio::test]
    async fn delete_of_owned_post_succeeds() {
        let mut posts = MockTestPostRepository::new();
        posts
            .expect_delete_owned()
            .withf(|id, owner| id.0 == 1 && owner.0 == 2)
            .times(1)
            .returning(|_, _| Ok(true));

        let service = PostService::new(Arc::new(posts), Arc::new(MockTestUserRepository::new()));

        assert!(service.delete_post(&PostId(1), &UserId(2)).await.is_ok());
    }

    #[tokio::test]
    async fn user_posts_for_unknown_username_fail() {
        let mut users = MockTestUserRepository::new();
        users
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));

        let service = PostService::new(Arc::new(MockTestPostRepository::new()), Arc::new(users));

        let username = Username::new("ghost".to_string()).unwrap();
        let result = service
            .list_user_posts(&username, PageRequest::default())
            .await;
        assert!(matches!(result, Err(PostError::UserNotFound(_))));
    }

    #[tokio::test]
    async fn user_posts_resolve_the_author_id() {
        let mut users = MockTestUserRepository::new();
        users
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(Some(sample_user(7))));

        let mut posts = MockTestPostRepository::new();
        posts
            .expect_list_by_user()
            .withf(|user_id, _| user_id.0 == 7)
            .times(1)
            .returning(|_, page| Ok(Paginated::new(vec![sample_post(1, 7)], page, 1)));

        let service = PostService::new(Arc::new(posts), Arc::new(users));

        let username = Username::new("alice".to_string()).unwrap();
        let result = service
            .list_user_posts(&username, PageRequest::default())
            .await
            .unwrap();
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.total, 1);
    }

    #[tokio::test]
    async fn timeline_delegates_to_the_repository() {
        let mut posts = MockTestPostRepository::new();
        posts
            .expect_list_timeline()
            .withf(|user_id, _| user_id.0 == 7)
            .times(1)
            .returning(|_, page| {
                Ok(Paginated::new(
                    vec![sample_post(2, 7), sample_post(1, 7)],
                    page,
                    2,
                ))
            });

        let service = PostService::new(Arc::new(posts), Arc::new(MockTestUserRepository::new()));

        let result = service
            .timeline(&UserId(7), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(result.items.len(), 2);
    }

    #[tokio::test]
    async fn get_missing_post_is_not_found() {
        let mut posts = MockTestPostRepository::new();
        posts.expect_find_by_id().times(1).returning(|_| Ok(None));

        let service = PostService::new(Arc::new(posts), Arc::new(MockTestUserRepository::new()));

        let result = service.get_post(&PostId(404)).await;
        assert!(matches!(result, Err(PostError::NotFound(404))));
    }
}
