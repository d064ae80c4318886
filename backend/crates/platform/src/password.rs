//! Password Hashing and Verification
//!
//! Credential handling for the authentication core:
//! - Argon2id hashing with RFC 9106 recommended parameters
//! - Zeroization of sensitive data
//! - Constant-time comparison
//! - Transparent rehash detection when parameters are strengthened
//!
//! ## Security Features
//! - Memory-hard hashing (64 MiB) prevents GPU/ASIC attacks
//! - Zeroization prevents memory inspection attacks
//! - Pepper support for an additional application-wide secret layer

use std::fmt;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::SaltString,
};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length in Unicode code points
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length in Unicode code points
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Argon2id memory cost in KiB (64 MiB)
pub const ARGON2_MEMORY_KIB: u32 = 65536;

/// Argon2id iteration count
pub const ARGON2_ITERATIONS: u32 = 3;

/// Argon2id degree of parallelism
pub const ARGON2_PARALLELISM: u32 = 4;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// Password is too short
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    /// Password is too long
    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    /// Password contains only whitespace
    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    /// Password contains control characters
    #[error("Password contains invalid control characters")]
    InvalidCharacter,

    /// Password lacks an uppercase letter
    #[error("Password must contain at least one uppercase letter")]
    MissingUppercase,

    /// Password lacks a digit
    #[error("Password must contain at least one digit")]
    MissingDigit,
}

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Invalid hash format
    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// Securely erased from memory when dropped. Does not implement `Clone`
/// and redacts its `Debug` output.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a new clear text password with strength validation
    ///
    /// Rules:
    /// - 8 to 128 Unicode code points
    /// - No control characters
    /// - At least one uppercase letter and one digit
    /// - Not empty/whitespace only
    ///
    /// Input is NFKC-normalized before validation, so the same credential
    /// always maps to the same byte sequence regardless of input method.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let normalized = Self::normalize(raw)?;

        let char_count = normalized.0.chars().count();

        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if !normalized.0.chars().any(|c| c.is_uppercase()) {
            return Err(PasswordPolicyError::MissingUppercase);
        }

        if !normalized.0.chars().any(|c| c.is_ascii_digit()) {
            return Err(PasswordPolicyError::MissingDigit);
        }

        Ok(normalized)
    }

    /// Create a password for verification only, skipping the strength policy
    ///
    /// Login must accept credentials that predate the current policy; only
    /// normalization and basic well-formedness checks apply here.
    pub fn for_verification(raw: String) -> Result<Self, PasswordPolicyError> {
        Self::normalize(raw)
    }

    /// NFKC-normalize and check basic well-formedness
    fn normalize(raw: String) -> Result<Self, PasswordPolicyError> {
        let normalized: String = raw.nfkc().collect();

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        for ch in normalized.chars() {
            if ch.is_control() && ch != ' ' && ch != '\t' {
                return Err(PasswordPolicyError::InvalidCharacter);
            }
        }

        Ok(Self(normalized))
    }

    /// Get the password as bytes for hashing
    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash the password using Argon2id
    ///
    /// ## Arguments
    /// * `pepper` - Optional application-wide secret
    ///
    /// ## Returns
    /// PHC-formatted hash string wrapped in `HashedPassword`
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let password_bytes = combine_with_pepper(self.as_bytes(), pepper);

        // Random 128-bit salt
        let salt = SaltString::generate(OsRng);

        let hash = current_argon2()
            .hash_password(&password_bytes, &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Hashed password in PHC string format
///
/// The PHC string carries the algorithm identifier, version, parameters,
/// salt and hash, so verification and rehash detection need no extra state.
/// Must never appear in any API response.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from PHC string (e.g., from database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();

        // Validate it's a valid PHC string
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;

        Ok(Self { hash })
    }

    /// Get the PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Verify a password against this hash
    ///
    /// ## Arguments
    /// * `password` - The clear text password to verify
    /// * `pepper` - Must match the pepper used during hashing
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        let password_bytes = combine_with_pepper(password.as_bytes(), pepper);

        let parsed_hash = match PasswordHash::new(&self.hash) {
            Ok(h) => h,
            Err(_) => return false,
        };

        // Argon2 uses constant-time comparison internally
        current_argon2()
            .verify_password(&password_bytes, &parsed_hash)
            .is_ok()
    }

    /// Check if the hash needs to be regenerated
    ///
    /// Returns true when the stored hash is not Argon2id or was produced
    /// with weaker-than-current cost parameters. Callers upgrade such
    /// hashes transparently on successful login.
    pub fn needs_rehash(&self) -> bool {
        let parsed_hash = match PasswordHash::new(&self.hash) {
            Ok(h) => h,
            Err(_) => return true,
        };

        if parsed_hash.algorithm != Algorithm::Argon2id.ident() {
            return true;
        }

        let params = match Params::try_from(&parsed_hash) {
            Ok(p) => p,
            Err(_) => return true,
        };

        params.m_cost() < ARGON2_MEMORY_KIB
            || params.t_cost() < ARGON2_ITERATIONS
            || params.p_cost() < ARGON2_PARALLELISM
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Argon2id instance with the current deployment parameters
fn current_argon2() -> Argon2<'static> {
    let params = Params::new(ARGON2_MEMORY_KIB, ARGON2_ITERATIONS, ARGON2_PARALLELISM, None)
        .expect("static Argon2 parameters are valid");
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
}

fn combine_with_pepper(password: &[u8], pepper: Option<&[u8]>) -> Vec<u8> {
    match pepper {
        Some(p) => {
            let mut combined = password.to_vec();
            combined.extend_from_slice(p);
            combined
        }
        None => password.to_vec(),
    }
}

// ============================================================================
// Tests
// ============================================================================
