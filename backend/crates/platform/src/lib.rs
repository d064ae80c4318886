//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations:
//! - Password hashing (Argon2id, RFC 9106 parameters)
//! - Password policy validation with memory zeroization

pub mod password;
