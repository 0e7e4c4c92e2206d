use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::RoleName;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::RoleRepository;
use crate::user::ports::UserRepository;

/// Domain service for registration and credential lookup.
///
/// Concrete implementation of AuthServicePort with dependency injection.
pub struct AuthService<UR, RR>
where
    UR: UserRepository,
    RR: RoleRepository,
{
    user_repository: Arc<UR>,
    role_repository: Arc<RR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR, RR> AuthService<UR, RR>
where
    UR: UserRepository,
    RR: RoleRepository,
{
    /// Create a new service with injected dependencies.
    ///
    /// # Arguments
    /// * `user_repository` - User persistence implementation
    /// * `role_repository` - Role persistence implementation
    pub fn new(user_repository: Arc<UR>, role_repository: Arc<RR>) -> Self {
        Self {
            user_repository,
            role_repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }

    /// Collapse requested role names into the canonical set to assign.
    ///
    /// No request at all means the default role; unrecognized names map to
    /// the default role, and the set semantics absorb duplicates.
    fn requested_role_names(command: &RegisterUserCommand) -> HashSet<RoleName> {
        match &command.roles {
            None => HashSet::from([RoleName::User]),
            Some(requested) => requested
                .iter()
                .map(|name| RoleName::from_request(name))
                .collect(),
        }
    }
}

#[async_trait]
impl<UR, RR> AuthServicePort for AuthService<UR, RR>
where
    UR: UserRepository,
    RR: RoleRepository,
{
    async fn register_user(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        if self
            .user_repository
            .exists_by_username(&command.username)
            .await?
        {
            return Err(UserError::DuplicateUsername(command.username.to_string()));
        }

        if self
            .user_repository
            .exists_by_email(command.email.as_str())
            .await?
        {
            return Err(UserError::DuplicateEmail(command.email.as_str().to_string()));
        }

        // Hash password using auth library
        let password_hash = self
            .password_hasher
            .hash(&command.password)
            .map_err(|e| UserError::Unknown(format!("Password hashing failed: {}", e)))?;

        // Every role is persisted through the resolver before the user row
        // references it.
        let role_names = Self::requested_role_names(&command);
        let mut roles = Vec::with_capacity(role_names.len());
        for name in role_names {
            roles.push(self.role_repository.find_or_create(name).await?);
        }

        let user = User {
            id: UserId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            roles,
            created_at: Utc::now(),
        };

        let created_user = self.user_repository.create(user).await?;

        tracing::info!(
            user_id = %created_user.id,
            username = %created_user.username,
            roles = ?created_user.role_names(),
            "User registered"
        );

        Ok(created_user)
    }

    async fn get_user_by_username(&self, username: &Username) -> Result<User, UserError> {
        self.user_repository
            .find_by_username(username)
            .await?
            .ok_or(UserError::NotFoundByUsername(username.to_string()))
    }
}
