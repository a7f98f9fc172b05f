use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::page::PageRequest;
use crate::domain::page::Paginated;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostAuthor;
use crate::domain::post::models::PostId;
use crate::domain::post::ports::PostRepository;
use crate::domain::user::models::UserId;
use crate::post::errors::PostError;

pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id: i64,
    user_id: i64,
    content: String,
    media_url: Option<String>,
    media_type: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    username: String,
    display_name: Option<String>,
    avatar_url: Option<String>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: PostId(row.id),
            user_id: UserId(row.user_id),
            content: row.content,
            media_url: row.media_url,
            media_type: row.media_type,
            created_at: row.created_at,
            updated_at: row.updated_at,
            author: PostAuthor {
                username: row.username,
                display_name: row.display_name,
                avatar_url: row.avatar_url,
            },
        }
    }
}

// Every read joins the author's public fields onto the post.
const POST_SELECT: &str = r#"
    SELECT p.id, p.user_id, p.content, p.media_url, p.media_type,
           p.created_at, p.updated_at,
           u.username, u.display_name, u.avatar_url
    FROM posts p
    JOIN users u ON p.user_id = u.id
"#;

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(
        &self,
        author: &UserId,
        command: &CreatePostCommand,
    ) -> Result<Post, PostError> {
        let post_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO posts (user_id, content, media_url, media_type)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(author.0)
        .bind(command.content())
        .bind(&command.media_url)
        .bind(&command.media_type)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        let query = format!("{POST_SELECT} WHERE p.id = $1");

        sqlx::query_as::<_, PostRow>(&query)
            .bind(post_id)
            .fetch_one(&self.pool)
            .await
            .map(Post::from)
            .map_err(|e| PostError::DatabaseError(e.to_string()))
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostError> {
        let query = format!("{POST_SELECT} WHERE p.id = $1");

        sqlx::query_as::<_, PostRow>(&query)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(Post::from))
            .map_err(|e| PostError::DatabaseError(e.to_string()))
    }

    async fn list_by_user(
        &self,
        user_id: &UserId,
        page: PageRequest,
    ) -> Result<Paginated<Post>, PostError> {
        let query = format!(
            r#"
            {POST_SELECT}
            WHERE p.user_id = $1
            ORDER BY p.created_at DESC
            LIMIT $2 OFFSET $3
            "#
        );

        let rows = sqlx::query_as::<_, PostRow>(&query)
            .bind(user_id.0)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE user_id = $1")
            .bind(user_id.0)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        Ok(Paginated::new(
            rows.into_iter().map(Post::from).collect(),
            page,
            total,
        ))
    }

    async fn list_timeline(
        &self,
        user_id: &UserId,
        page: PageRequest,
    ) -> Result<Paginated<Post>, PostError> {
        let query = format!(
            r#"
            {POST_SELECT}
            WHERE p.user_id = $1
               OR p.user_id IN (
                 SELECT following_id FROM follows WHERE follower_id = $1
               )
            ORDER BY p.created_at DESC
            LIMIT $2 OFFSET $3
            "#
        );

        let rows = sqlx::query_as::<_, PostRow>(&query)
            .bind(user_id.0)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM posts p
            WHERE p.user_id = $1
               OR p.user_id IN (
                 SELECT following_id FROM follows WHERE follower_id = $1
               )
            "#,
        )
        .bind(user_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        Ok(Paginated::new(
            rows.into_iter().map(Post::from).collect(),
            page,
            total,
        ))
    }

    async fn delete_owned(&self, id: &PostId, owner: &UserId) -> Result<bool, PostError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1 AND user_id = $2")
            .bind(id.0)
            .bind(owner.0)
            .execute(&self.pool)
            .await
            .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
