//! In-memory Repository Implementation
//!
//! Backing store for unit and handler tests. Not intended for production.

use std::collections::HashMap;
use std::sync::Mutex;

use uuid::Uuid;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, UserId};
use crate::error::{AuthError, AuthResult};

/// HashMap-backed user repository
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_users<T>(&self, f: impl FnOnce(&mut HashMap<Uuid, User>) -> T) -> AuthResult<T> {
        let mut users = self
            .users
            .lock()
            .map_err(|_| AuthError::Internal("User store lock poisoned".into()))?;
        Ok(f(&mut users))
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        // Mirrors the unique index on email in the real store
        self.with_users(|users| {
            if users
                .values()
                .any(|u| u.email == user.email && u.user_id != user.user_id)
            {
                return Err(AuthError::DuplicateEmail);
            }
            users.insert(*user.user_id.as_uuid(), user.clone());
            Ok(())
        })?
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        self.with_users(|users| users.get(user_id.as_uuid()).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        self.with_users(|users| users.values().find(|u| &u.email == email).cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        self.with_users(|users| users.values().any(|u| &u.email == email))
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        self.with_users(|users| {
            users.insert(*user.user_id.as_uuid(), user.clone());
        })
    }
}
