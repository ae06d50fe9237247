use async_trait::async_trait;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::Credentials;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user with a hashed password.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Hashing` - Password hashing failed (server fault)
    /// * `DatabaseError` - Database operation failed
    async fn register_user(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// Authenticate an email/password pair against stored records.
    ///
    /// An unknown email and a wrong password both fail with
    /// `InvalidCredentials`; callers never learn which one it was.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Email not registered or password mismatch
    /// * `DatabaseError` - Database operation failed
    async fn authenticate_by_credentials(
        &self,
        credentials: &Credentials,
    ) -> Result<User, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: UserId) -> Result<User, UserError>;

    /// Retrieve a page of users together with the total count.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_users(&self, limit: i64, offset: i64) -> Result<(Vec<User>, i64), UserError>;

    /// Apply a partial update to an existing user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_user(&self, id: UserId, command: UpdateUserCommand)
        -> Result<User, UserError>;

    /// Delete a user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_user(&self, id: UserId) -> Result<(), UserError>;
}

/// Port for user persistence operations.
///
/// Implementations must be safe for concurrent reads; the authentication
/// path only ever reads through this port.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Insert a new user and return it with its assigned id.
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Find a user by id.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError>;

    /// Find a user by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Fetch a page of users ordered by creation time.
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, UserError>;

    /// Count all users.
    async fn count(&self) -> Result<i64, UserError>;

    /// Persist changes to an existing user.
    async fn update(&self, user: User) -> Result<User, UserError>;

    /// Delete a user by id.
    async fn delete(&self, id: UserId) -> Result<(), UserError>;
}
