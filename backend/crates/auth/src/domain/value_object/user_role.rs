//! User role value object
//!
//! Closed role enumeration. `Sales` is the default for self-registration;
//! `Admin` unlocks administrative operations such as deactivating users.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum UserRole {
    #[default]
    Sales = 0,
    Admin = 1,
}

impl UserRole {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            UserRole::Sales => "sales",
            UserRole::Admin => "admin",
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    /// Parse an untrusted role code from client input
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "sales" => Some(UserRole::Sales),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }

    /// Restore from a database id (trusted input)
    #[inline]
    pub fn from_id(id: i16) -> Self {
        match id {
            0 => UserRole::Sales,
            1 => UserRole::Admin,
            _ => {
                tracing::error!("Invalid UserRole id: {}", id);
                unreachable!("Invalid UserRole id: {}", id)
            }
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
