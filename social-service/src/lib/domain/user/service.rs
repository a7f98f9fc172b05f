use std::sync::Arc;

use crate::user::errors::UserError;
use crate::user::models::NewUser;
use crate::user::models::RegisterUserCommand;
use crate::user::models::UpdateProfileCommand;
use crate::user::models::User;
use crate::user::models::UserId;
use crate::user::models::Username;
use crate::user::ports::UserRepository;

/// Domain service for user registration, login and profile management.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }

    /// Register a new user, hashing the password before persistence.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` / `EmailAlreadyExists` - Uniqueness violated
    /// * `Password` - Hashing failed
    /// * `DatabaseError` - Store operation failed
    pub async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        let password_hash = self.password_hasher.hash(&command.password)?;

        let user = self
            .repository
            .create(NewUser {
                username: command.username,
                email: command.email,
                password_hash,
                display_name: command.display_name,
                bio: command.bio,
            })
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(user)
    }

    pub async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    pub async fn get_user_by_username(&self, username: &Username) -> Result<User, UserError> {
        self.repository
            .find_by_username(username)
            .await?
            .ok_or(UserError::NotFoundByUsername(username.to_string()))
    }

    /// Verify a login attempt. The identifier matches username or email.
    ///
    /// Unknown identifier and wrong password both collapse into
    /// `InvalidCredentials` so the response does not reveal which was wrong.
    pub async fn verify_credentials(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<User, UserError> {
        let user = self
            .repository
            .find_by_identifier(identifier)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !self.password_hasher.verify(password, &user.password_hash)? {
            return Err(UserError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Apply a partial profile update; absent fields keep their values.
    pub async fn update_profile(
        &self,
        id: &UserId,
        command: UpdateProfileCommand,
    ) -> Result<User, UserError> {
        self.repository
            .update_profile(id, &command)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::user::models::EmailAddress;

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

    fn persisted(new_user: NewUser) -> User {
        User {
            id: UserId(1),
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            display_name: new_user.display_name,
            bio: new_user.bio,
            avatar_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn register_command() -> RegisterUserCommand {
        RegisterUserCommand {
            username: Username::new("alice".to_string()).unwrap(),
            email: EmailAddress::new("alice@example.com".to_string()).unwrap(),
            password: "pass_word!".to_string(),
            display_name: Some("Alice".to_string()),
            bio: None,
        }
    }

    #[tokio::test]
    async fn register_hashes_the_password() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_create()
            .withf(|new_user| {
                new_user.username.as_str() == "alice"
                    && new_user.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|new_user| Ok(persisted(new_user)));

        let service = UserService::new(Arc::new(repository));

        let user = service.register(register_command()).await.unwrap();
        assert_eq!(user.username.as_str(), "alice");
        assert_eq!(user.display_name.as_deref(), Some("Alice"));
    }

    #[tokio::test]
    async fn register_surfaces_duplicate_username() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_create().times(1).returning(|new_user| {
            Err(UserError::UsernameAlreadyExists(
                new_user.username.to_string(),
            ))
        });

        let service = UserService::new(Arc::new(repository));

        let result = service.register(register_command()).await;
        assert!(matches!(result, Err(UserError::UsernameAlreadyExists(_))));
    }

    #[tokio::test]
    async fn verify_credentials_accepts_the_right_password() {
        let hasher = auth::PasswordHasher::new();
        let hash = hasher.hash("pass_word!").unwrap();

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_identifier()
            .withf(|identifier| identifier == "alice")
            .times(1)
            .returning(move |_| {
                Ok(Some(persisted(NewUser {
                    username: Username::new("alice".to_string()).unwrap(),
                    email: EmailAddress::new("alice@example.com".to_string()).unwrap(),
                    password_hash: hash.clone(),
                    display_name: None,
                    bio: None,
                })))
            });

        let service = UserService::new(Arc::new(repository));

        let user = service.verify_credentials("alice", "pass_word!").await.unwrap();
        assert_eq!(user.username.as_str(), "alice");
    }

    #[tokio::test]
    async fn verify_credentials_rejects_a_wrong_password() {
        let hasher = auth::PasswordHasher::new();
        let hash = hasher.hash("pass_word!").unwrap();

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_identifier()
            .times(1)
            .returning(move |_| {
                Ok(Some(persisted(NewUser {
                    username: Username::new("alice".to_string()).unwrap(),
                    email: EmailAddress::new("alice@example.com".to_string()).unwrap(),
                    password_hash: hash.clone(),
                    display_name: None,
                    bio: None,
                })))
            });

        let service = UserService::new(Arc::new(repository));

        let result = service.verify_credentials("alice", "wrong").await;
        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn verify_credentials_hides_unknown_users() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_identifier()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository));

        let result = service.verify_credentials("nobody", "pass_word!").await;
        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn update_profile_of_missing_user_is_not_found() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_update_profile()
            .times(1)
            .returning(|_, _| Ok(None));

        let service = UserService::new(Arc::new(repository));

        let result = service
            .update_profile(&UserId(99), UpdateProfileCommand::default())
            .await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }
}
