//! Change Password Use Case
//!
//! Replaces the credential of an authenticated principal. No new token is
//! issued; outstanding tokens run to their natural expiry.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    UserId,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Change password input
pub struct ChangePasswordInput {
    pub current_password: String,
    pub new_password: String,
}

/// Change password use case
pub struct ChangePasswordUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> ChangePasswordUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, user_id: &UserId, input: ChangePasswordInput) -> AuthResult<()> {
        let mut user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::Unauthenticated)?;

        let current = RawPassword::for_login(input.current_password)
            .map_err(|_| AuthError::IncorrectPassword)?;

        if !user.password_hash.verify(&current, self.config.pepper()) {
            return Err(AuthError::IncorrectPassword);
        }

        let new_password = RawPassword::new(input.new_password)
            .map_err(|e| AuthError::WeakPassword(e.to_string()))?;
        let new_hash = UserPassword::from_raw(&new_password, self.config.pepper())
            .map_err(|e| AuthError::Hashing(e.to_string()))?;

        user.set_password(new_hash);
        self.user_repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "Password changed");

        Ok(())
    }
}
