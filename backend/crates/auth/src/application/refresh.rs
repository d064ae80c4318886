//! Refresh Use Case
//!
//! Issues a fresh token to an already-authenticated principal. The
//! principal is re-loaded so a deactivation between issuance and refresh
//! cuts the session off.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::UserId;
use crate::error::{AuthError, AuthResult};

/// Refresh output
pub struct RefreshOutput {
    pub user: User,
    pub token: String,
}

/// Refresh use case
pub struct RefreshUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> RefreshUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, user_id: &UserId) -> AuthResult<RefreshOutput> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::Unauthenticated)?;

        if !user.can_login() {
            return Err(AuthError::Unauthenticated);
        }

        let token = TokenService::new(&self.config).issue(&user.user_id, user.role);

        tracing::debug!(user_id = %user.user_id, "Token refreshed");

        Ok(RefreshOutput { user, token })
    }
}
