//! Auth Middleware
//!
//! Bearer token gate for protected routes, plus an admin-only gate that
//! runs after it.

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{UserId, user_role::UserRole};
use crate::error::AuthError;

/// Middleware state for the token gate
pub struct AuthGateState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R> Clone for AuthGateState<R>
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

/// Authenticated principal stored in request extensions
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    pub user_id: UserId,
    pub role: UserRole,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Middleware that requires a valid bearer token and an active account
pub async fn require_auth<R>(
    State(state): State<AuthGateState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: UserRepository + Send + Sync + 'static,
{
    let token = bearer_token(&req).ok_or_else(|| AuthError::Unauthenticated.into_response())?;

    let claims = TokenService::new(&state.config)
        .verify(&token)
        .map_err(|e| e.into_response())?;

    let user_id = claims.subject().map_err(|e| e.into_response())?;

    // The token alone is not enough. The account must still exist and be
    // active, so deactivation takes effect before the token expires.
    let user = match state.repo.find_by_id(&user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => return Err(AuthError::Unauthenticated.into_response()),
        Err(e) => return Err(e.into_response()),
    };

    if !user.can_login() {
        return Err(AuthError::Unauthenticated.into_response());
    }

    req.extensions_mut().insert(CurrentUser {
        user_id: user.user_id,
        role: user.role,
    });

    Ok(next.run(req).await)
}

/// Middleware that requires the already-authenticated principal to be admin
pub async fn require_admin(req: Request<Body>, next: Next) -> Result<Response, Response> {
    match req.extensions().get::<CurrentUser>() {
        Some(current) if current.is_admin() => Ok(next.run(req).await),
        Some(_) => Err(AuthError::Forbidden.into_response()),
        // Reached without the token gate in front of it
        None => Err(AuthError::Unauthenticated.into_response()),
    }
}

fn bearer_token(req: &Request<Body>) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    value.strip_prefix("Bearer ").map(|t| t.trim().to_string())
}
