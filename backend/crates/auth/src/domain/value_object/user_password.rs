//! User Password Value Object
//!
//! Domain wrapper around `platform::password`. `RawPassword` is the
//! short-lived credential from user input (zeroized on drop);
//! `UserPassword` is the stored Argon2id hash.

use platform::password::{
    ClearTextPassword, HashedPassword, PasswordHashError, PasswordPolicyError,
};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Create with full strength validation (registration, password change)
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        Ok(Self(ClearTextPassword::new(raw)?))
    }

    /// Create for verification only (login path)
    ///
    /// Skips the strength policy: stored credentials may predate it.
    pub fn for_login(raw: String) -> Result<Self, PasswordPolicyError> {
        Ok(Self(ClearTextPassword::for_verification(raw)?))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Hashed user password for database storage
///
/// Argon2id PHC string. Never serialized into API responses.
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Create from raw password by hashing
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> Result<Self, PasswordHashError> {
        Ok(Self(raw.inner().hash(pepper)?))
    }

    /// Create from PHC string (from database)
    pub fn from_phc_string(phc_string: impl Into<String>) -> Result<Self, PasswordHashError> {
        Ok(Self(HashedPassword::from_phc_string(phc_string)?))
    }

    /// Get PHC string for database storage
    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Verify a raw password against this hash (constant-time)
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }

    /// True when the hash uses weaker-than-current parameters
    pub fn needs_rehash(&self) -> bool {
        self.0.needs_rehash()
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}
