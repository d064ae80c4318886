//! Deactivate Use Case
//!
//! Administrative soft delete. The record is kept so that still-valid
//! tokens of the deactivated account are rejected by the middleware.

use std::sync::Arc;

use crate::domain::repository::UserRepository;
use crate::domain::value_object::UserId;
use crate::error::{AuthError, AuthResult};

/// Deactivate use case
pub struct DeactivateUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> DeactivateUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, target: &UserId) -> AuthResult<()> {
        let mut user = self
            .user_repo
            .find_by_id(target)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        user.deactivate();
        self.user_repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "User deactivated");

        Ok(())
    }
}
