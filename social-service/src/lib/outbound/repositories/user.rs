use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    password_hash: String,
    display_name: Option<String>,
    bio: Option<String>,
    avatar_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn try_into_user(self) -> Result<User, UserError> {
        Ok(User {
            id: UserId(self.id),
            username: Username::new(self.username)?,
            email: EmailAddress::new(self.email)?,
            password_hash: self.password_hash,
            display_name: self.display_name,
            bio: self.bio,
            avatar_url: self.avatar_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const USER_COLUMNS: &str =
    "id, username, email, password_hash, display_name, bio, avatar_url, created_at, updated_at";

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, UserError> {
        let query = format!(
            r#"
            INSERT INTO users (username, email, password_hash, display_name, bio)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(new_user.username.as_str())
            .bind(new_user.email.as_str())
            .bind(&new_user.password_hash)
            .bind(&new_user.display_name)
            .bind(&new_user.bio)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation() {
                        if db_err.constraint() == Some("users_username_key") {
                            return UserError::UsernameAlreadyExists(
                                new_user.username.as_str().to_string(),
                            );
                        }
                        if db_err.constraint() == Some("users_email_key") {
                            return UserError::EmailAlreadyExists(
                                new_user.email.as_str().to_string(),
                            );
                        }
                    }
                }
                UserError::DatabaseError(e.to_string())
            })?;

        row.try_into_user()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        sqlx::query_as::<_, UserRow>(&query)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?
            .map(UserRow::try_into_user)
            .transpose()
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");

        sqlx::query_as::<_, UserRow>(&query)
            .bind(username.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?
            .map(UserRow::try_into_user)
            .transpose()
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, UserError> {
        let query =
            format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1 OR email = $1");

        sqlx::query_as::<_, UserRow>(&query)
            .bind(identifier)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?
            .map(UserRow::try_into_user)
            .transpose()
    }

    async fn update_profile(
        &self,
        id: &UserId,
        command: &UpdateProfileCommand,
    ) -> Result<Option<User>, UserError> {
        let query = format!(
            r#"
            UPDATE users
            SET display_name = COALESCE($2, display_name),
                bio = COALESCE($3, bio),
                avatar_url = COALESCE($4, avatar_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );

        sqlx::query_as::<_, UserRow>(&query)
            .bind(id.0)
            .bind(&command.display_name)
            .bind(&command.bio)
            .bind(&command.avatar_url)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?
            .map(UserRow::try_into_user)
            .transpose()
    }
}
