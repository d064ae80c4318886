//! Register Use Case
//!
//! Creates a new principal.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
    user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    /// Role code; defaults to `sales` when absent
    pub role: Option<String>,
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<User> {
        let email = Email::new(input.email)?;

        let role = match input.role.as_deref() {
            None => UserRole::default(),
            Some(code) => UserRole::from_code(code)
                .ok_or_else(|| AuthError::Validation(format!("Unknown role: {code}")))?,
        };

        // Uniqueness check before hashing; the unique index is the backstop
        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::DuplicateEmail);
        }

        let raw_password = RawPassword::new(input.password)
            .map_err(|e| AuthError::WeakPassword(e.to_string()))?;
        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())
            .map_err(|e| AuthError::Hashing(e.to_string()))?;

        let user = User::new(email, password_hash, role);

        self.user_repo.create(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            role = %user.role,
            "User registered"
        );

        Ok(user)
    }
}
