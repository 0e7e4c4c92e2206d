use async_trait::async_trait;

use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Role;
use crate::domain::user::models::RoleName;
use crate::domain::user::models::User;
use crate::user::errors::UserError;
use crate::user::models::Username;

/// Port for registration and credential lookup operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user with validated credentials and optional
    /// requested role names.
    ///
    /// # Returns
    /// Created user entity with its resolved role set
    ///
    /// # Errors
    /// * `DuplicateUsername` - Username is already taken
    /// * `DuplicateEmail` - Email is already registered
    /// * `DatabaseError` - Storage operation failed
    async fn register_user(&self, command: RegisterUserCommand) -> Result<User, UserError>;

    /// Retrieve a user and its roles by unique username.
    ///
    /// # Errors
    /// * `NotFoundByUsername` - No user with this username
    /// * `DatabaseError` - Storage operation failed
    async fn get_user_by_username(&self, username: &Username) -> Result<User, UserError>;
}

/// Persistence operations for the user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user and its role assignments.
    ///
    /// The referenced roles must already exist; only the user row and the
    /// join rows are written here.
    ///
    /// # Errors
    /// * `DuplicateUsername` - Username is already taken
    /// * `DuplicateEmail` - Email is already registered
    /// * `DatabaseError` - Storage operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Check whether a username is already taken.
    ///
    /// # Errors
    /// * `DatabaseError` - Storage operation failed
    async fn exists_by_username(&self, username: &Username) -> Result<bool, UserError>;

    /// Check whether an email address is already registered.
    ///
    /// # Errors
    /// * `DatabaseError` - Storage operation failed
    async fn exists_by_email(&self, email: &str) -> Result<bool, UserError>;

    /// Retrieve a user with its role set by username.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Storage operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
}

/// Persistence operations for role entities.
#[async_trait]
pub trait RoleRepository: Send + Sync + 'static {
    /// Return the role row for a canonical name, creating it atomically if
    /// absent.
    ///
    /// Concurrent callers resolving the same missing name must end up with
    /// the same row; the name column carries a uniqueness constraint.
    ///
    /// # Errors
    /// * `DatabaseError` - Storage operation failed
    async fn find_or_create(&self, name: RoleName) -> Result<Role, UserError>;
}
