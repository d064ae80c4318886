//! Login Use Case
//!
//! Authenticates a principal and issues a bearer token.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
pub struct LoginOutput {
    pub user: User,
    pub token: String,
}

/// Login use case
pub struct LoginUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> LoginUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        // Every failure before password verification collapses into
        // InvalidCredentials so the response shape never reveals whether
        // the email exists.
        let email = Email::new(input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.can_login() {
            return Err(AuthError::InvalidCredentials);
        }

        let raw_password = RawPassword::for_login(input.password)
            .map_err(|_| AuthError::InvalidCredentials)?;

        if !user.password_hash.verify(&raw_password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        let mut user = user;

        // Transparent hash upgrade. Failure is logged, never surfaced:
        // the user presented valid credentials and must get in.
        if user.password_hash.needs_rehash() {
            match UserPassword::from_raw(&raw_password, self.config.pepper()) {
                Ok(new_hash) => {
                    user.set_password(new_hash);
                    tracing::info!(user_id = %user.user_id, "Password hash upgraded on login");
                }
                Err(e) => {
                    tracing::warn!(user_id = %user.user_id, error = %e, "Password rehash failed");
                }
            }
        }

        user.record_login();
        if let Err(e) = self.user_repo.update(&user).await {
            tracing::warn!(user_id = %user.user_id, error = %e, "Failed to persist login update");
        }

        let token = TokenService::new(&self.config).issue(&user.user_id, user.role);

        tracing::info!(user_id = %user.user_id, "User logged in");

        Ok(LoginOutput { user, token })
    }
}
