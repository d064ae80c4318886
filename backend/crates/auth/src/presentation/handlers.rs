//! HTTP Handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::application::{
    ChangePasswordInput, ChangePasswordUseCase, DeactivateUseCase, LoginInput, LoginUseCase,
    RefreshUseCase, RegisterInput, RegisterUseCase,
};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::UserId;
use crate::error::AuthResult;
use crate::presentation::dto::{
    ChangePasswordRequest, LoginRequest, LoginResponse, MessageResponse, RefreshResponse,
    RegisterRequest, RegisterResponse, UserView,
};
use crate::presentation::middleware::CurrentUser;

/// Shared state for auth handlers
pub struct AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// Manual impl: a derived Clone would demand R: Clone, which the
// repositories behind an Arc never need to be.
impl<R> Clone for AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/v1/auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<(StatusCode, Json<RegisterResponse>)>
where
    R: UserRepository + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let input = RegisterInput {
        email: req.email,
        password: req.password,
        role: req.role,
    };

    let user = use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user: UserView::from(&user),
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/v1/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());

    let input = LoginInput {
        email: req.email,
        password: req.password,
    };

    let output = use_case.execute(input).await?;

    Ok(Json(LoginResponse {
        user: UserView::from(&output.user),
        token: output.token,
    }))
}

// ============================================================================
// Refresh
// ============================================================================

/// POST /api/v1/auth/refresh (token gate in front)
pub async fn refresh<R>(
    State(state): State<AuthAppState<R>>,
    Extension(current): Extension<CurrentUser>,
) -> AuthResult<Json<RefreshResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let use_case = RefreshUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case.execute(&current.user_id).await?;

    Ok(Json(RefreshResponse {
        user: UserView::from(&output.user),
        token: output.token,
    }))
}

// ============================================================================
// Change Password
// ============================================================================

/// PATCH /api/v1/auth/change-password (token gate in front)
pub async fn change_password<R>(
    State(state): State<AuthAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<ChangePasswordRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let use_case = ChangePasswordUseCase::new(state.repo.clone(), state.config.clone());

    let input = ChangePasswordInput {
        current_password: req.current_password,
        new_password: req.new_password,
    };

    use_case.execute(&current.user_id, input).await?;

    Ok(Json(MessageResponse {
        message: "Password updated".to_string(),
    }))
}

// ============================================================================
// Deactivate User (admin only)
// ============================================================================

/// PATCH /api/v1/users/{id}/deactivate (token gate + admin gate in front)
pub async fn deactivate_user<R>(
    State(state): State<AuthAppState<R>>,
    Path(id): Path<Uuid>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + Send + Sync + 'static,
{
    let use_case = DeactivateUseCase::new(state.repo.clone());

    use_case.execute(&UserId::from_uuid(id)).await?;

    Ok(StatusCode::NO_CONTENT)
}
