use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::Credentials;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Owns the credential-checking logic: registration hashes passwords
/// before they reach the repository, and `authenticate_by_credentials`
/// is the only place a stored hash is ever compared against input.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
    fallback_hash: String,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with an injected repository.
    pub fn new(repository: Arc<UR>) -> Self {
        let password_hasher = auth::PasswordHasher::new();

        // Verifying a candidate against this hash keeps an unregistered
        // email exactly as expensive as a wrong password.
        let fallback_hash = password_hasher
            .hash("fallback-credential-padding")
            .unwrap_or_default();

        Self {
            repository,
            password_hasher,
            fallback_hash,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let password_hash = self
            .password_hasher
            .hash(&command.password)
            .map_err(|e| UserError::Hashing(e.to_string()))?;

        self.repository
            .create(NewUser {
                email: command.email,
                name: String::new(),
                password_hash,
            })
            .await
    }

    async fn authenticate_by_credentials(
        &self,
        credentials: &Credentials,
    ) -> Result<User, UserError> {
        match self.repository.find_by_email(&credentials.email).await? {
            Some(user) => {
                if self
                    .password_hasher
                    .verify(&credentials.password, &user.password_hash)
                {
                    Ok(user)
                } else {
                    Err(UserError::InvalidCredentials)
                }
            }
            None => {
                let _ = self
                    .password_hasher
                    .verify(&credentials.password, &self.fallback_hash);
                Err(UserError::InvalidCredentials)
            }
        }
    }

    async fn get_user(&self, id: UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn list_users(&self, limit: i64, offset: i64) -> Result<(Vec<User>, i64), UserError> {
        let total = self.repository.count().await?;
        let users = self.repository.list(limit, offset).await?;

        Ok((users, total))
    }

    async fn update_user(
        &self,
        id: UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        if let Some(new_name) = command.name {
            if !new_name.is_empty() {
                user.name = new_name;
            }
        }

        self.repository.update(user).await
    }

    async fn delete_user(&self, id: UserId) -> Result<(), UserError> {
        self.repository.delete(id).await
    }
}
