//! User Entity
//!
//! The principal: identity, role, active flag and credential hash.
//! Deactivation is a soft delete; the record stays so the authorization
//! middleware can reject still-valid tokens of deactivated accounts.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    UserId, email::Email, user_password::UserPassword, user_role::UserRole,
};

/// User (principal) entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Unique, lowercased email (login identifier)
    pub email: Email,
    /// Role (Sales, Admin)
    pub role: UserRole,
    /// Soft-delete flag; inactive users cannot authenticate
    pub active: bool,
    /// Argon2id password hash
    pub password_hash: UserPassword,
    /// Last successful login time
    pub last_login_at: Option<DateTime<Utc>>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new active user
    pub fn new(email: Email, password_hash: UserPassword, role: UserRole) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            email,
            role,
            active: true,
            password_hash,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record successful login
    pub fn record_login(&mut self) {
        let now = Utc::now();
        self.last_login_at = Some(now);
        self.updated_at = now;
    }

    /// Check if the user may authenticate
    pub fn can_login(&self) -> bool {
        self.active
    }

    /// Soft-delete the user
    pub fn deactivate(&mut self) {
        self.active = false;
        self.updated_at = Utc::now();
    }

    /// Replace the stored password hash
    pub fn set_password(&mut self, password_hash: UserPassword) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }
}
