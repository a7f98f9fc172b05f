use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::follow::errors::FollowError;
use crate::domain::follow::models::FollowEdge;
use crate::domain::follow::ports::FollowRepository;
use crate::domain::page::PageRequest;
use crate::domain::page::Paginated;
use crate::domain::user::models::UserId;

pub struct PostgresFollowRepository {
    pool: PgPool,
}

impl PostgresFollowRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct FollowEdgeRow {
    id: i64,
    username: String,
    display_name: Option<String>,
    avatar_url: Option<String>,
    followed_at: chrono::DateTime<chrono::Utc>,
}

impl From<FollowEdgeRow> for FollowEdge {
    fn from(row: FollowEdgeRow) -> Self {
        FollowEdge {
            user_id: UserId(row.id),
            username: row.username,
            display_name: row.display_name,
            avatar_url: row.avatar_url,
            followed_at: row.followed_at,
        }
    }
}

#[async_trait]
impl FollowRepository for PostgresFollowRepository {
    async fn create(&self, follower: &UserId, following: &UserId) -> Result<(), FollowError> {
        sqlx::query("INSERT INTO follows (follower_id, following_id) VALUES ($1, $2)")
            .bind(follower.0)
            .bind(following.0)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                // The service pre-checks both cases; the constraints catch
                // concurrent requests racing past those checks.
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation() {
                        return FollowError::AlreadyFollowing(following.to_string());
                    }
                    if db_err.is_check_violation() {
                        return FollowError::SelfFollow;
                    }
                }
                FollowError::DatabaseError(e.to_string())
            })?;

        Ok(())
    }

    async fn delete(&self, follower: &UserId, following: &UserId) -> Result<bool, FollowError> {
        let result =
            sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND following_id = $2")
                .bind(follower.0)
                .bind(following.0)
                .execute(&self.pool)
                .await
                .map_err(|e| FollowError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, follower: &UserId, following: &UserId) -> Result<bool, FollowError> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM follows WHERE follower_id = $1 AND following_id = $2)",
        )
        .bind(follower.0)
        .bind(following.0)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| FollowError::DatabaseError(e.to_string()))
    }

    async fn list_followers(
        &self,
        user_id: &UserId,
        page: PageRequest,
    ) -> Result<Paginated<FollowEdge>, FollowError> {
        let rows = sqlx::query_as::<_, FollowEdgeRow>(
            r#"
            SELECT u.id, u.username, u.display_name, u.avatar_url,
                   f.created_at AS followed_at
            FROM follows f
            JOIN users u ON f.follower_id = u.id
            WHERE f.following_id = $1
            ORDER BY f.created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id.0)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| FollowError::DatabaseError(e.to_string()))?;

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM follows WHERE following_id = $1")
                .bind(user_id.0)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| FollowError::DatabaseError(e.to_string()))?;

        Ok(Paginated::new(
            rows.into_iter().map(FollowEdge::from).collect(),
            page,
            total,
        ))
    }

    async fn list_following(
        &self,
        user_id: &UserId,
        page: PageRequest,
    ) -> Result<Paginated<FollowEdge>, FollowError> {
        let rows = sqlx::query_as::<_, FollowEdgeRow>(
            r#"
            SELECT u.id, u.username, u.display_name, u.avatar_url,
                   f.created_at AS followed_at
            FROM follows f
            JOIN users u ON f.following_id = u.id
            WHERE f.follower_id = $1
            ORDER BY f.created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id.0)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| FollowError::DatabaseError(e.to_string()))?;

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM follows WHERE follower_id = $1")
                .bind(user_id.0)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| FollowError::DatabaseError(e.to_string()))?;

        Ok(Paginated::new(
            rows.into_iter().map(FollowEdge::from).collect(),
            page,
            total,
        ))
    }
}
