use async_trait::async_trait;

use crate::user::errors::UserError;
use crate::user::models::NewUser;
use crate::user::models::UpdateProfileCommand;
use crate::user::models::User;
use crate::user::models::UserId;
use crate::user::models::Username;

/// Persistence operations for the user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user; the store assigns the id.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` / `EmailAlreadyExists` - Uniqueness violated
    /// * `DatabaseError` - Store operation failed
    async fn create(&self, new_user: NewUser) -> Result<User, UserError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;

    /// Look up by login identifier: matches username or email.
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, UserError>;

    /// Apply a partial profile update, bumping `updated_at`.
    ///
    /// Returns `None` when the user does not exist.
    async fn update_profile(
        &self,
        id: &UserId,
        command: &UpdateProfileCommand,
    ) -> Result<Option<User>, UserError>;
}
