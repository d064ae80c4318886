//! Auth and User Routers

use axum::{
    Router, middleware,
    routing::{patch, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgUserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthGateState, require_admin, require_auth};

/// Create the auth router with the PostgreSQL repository
pub fn auth_router(repo: PgUserRepository, config: Arc<AuthConfig>) -> Router {
    auth_router_generic(Arc::new(repo), config)
}

/// Create the users router with the PostgreSQL repository
pub fn users_router(repo: PgUserRepository, config: Arc<AuthConfig>) -> Router {
    users_router_generic(Arc::new(repo), config)
}

/// Auth router for any repository implementation.
///
/// `/register` and `/login` are public; `/refresh` and `/change-password`
/// sit behind the token gate.
pub fn auth_router_generic<R>(repo: Arc<R>, config: Arc<AuthConfig>) -> Router
where
    R: UserRepository + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: repo.clone(),
        config: config.clone(),
    };
    let gate = AuthGateState { repo, config };

    let public = Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>));

    let protected = Router::new()
        .route("/refresh", post(handlers::refresh::<R>))
        .route("/change-password", patch(handlers::change_password::<R>))
        .route_layer(middleware::from_fn_with_state(gate, require_auth::<R>));

    public.merge(protected).with_state(state)
}

/// Users router for any repository implementation.
///
/// Admin-only operations. Layer order matters: the token gate is added
/// last so it runs first, and `require_admin` can read the principal it
/// stored.
pub fn users_router_generic<R>(repo: Arc<R>, config: Arc<AuthConfig>) -> Router
where
    R: UserRepository + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: repo.clone(),
        config: config.clone(),
    };
    let gate = AuthGateState { repo, config };

    Router::new()
        .route("/{id}/deactivate", patch(handlers::deactivate_user::<R>))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(gate, require_auth::<R>))
        .with_state(state)
}
