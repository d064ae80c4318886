//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and the token service
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, routers, middleware
//!
//! ## Features
//! - User registration/login with email + password
//! - Signed bearer tokens with a fixed lifetime and `/refresh` renewal
//! - Role-based access (Sales, Admin)
//! - Soft deletion of accounts by admins
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, rehashed on login when parameters age
//! - Login failures are indistinguishable for unknown email, wrong
//!   password, and deactivated accounts
//! - Deactivated accounts are rejected on every request even while their
//!   tokens are still unexpired

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgUserRepository;
pub use presentation::router::{auth_router, users_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
