//! Repository Traits
//!
//! Interfaces for data persistence. Implementations live in the
//! infrastructure layer; the persistent store is treated as an opaque
//! key-document store that enforces email uniqueness.

use crate::domain::entity::user::User;
use crate::domain::value_object::{UserId, email::Email};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Check if email is already bound to a principal
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Update user (profile, credential hash, active flag)
    async fn update(&self, user: &User) -> AuthResult<()>;
}
