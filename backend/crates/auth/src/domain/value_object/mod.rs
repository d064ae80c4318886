//! Value objects for the auth domain

pub mod email;
pub mod user_password;
pub mod user_role;

/// Typed principal identifier (UUID v4 underneath)
pub use kernel::id::UserId;
