//! Token Service
//!
//! Issues and verifies stateless, signed bearer tokens. A token is
//! `base64url(claims JSON) . base64url(HMAC-SHA256 signature)`; nothing is
//! stored server-side, so verification is purely cryptographic. Expiry is
//! checked on every verification.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::application::config::AuthConfig;
use crate::domain::value_object::{UserId, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// Claims carried by a bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: principal UUID
    pub sub: String,
    /// Role code at issuance time
    pub role: String,
    /// Issued-at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds, exclusive)
    pub exp: i64,
}

impl Claims {
    /// Parse the subject id
    pub fn subject(&self) -> AuthResult<UserId> {
        self.sub.parse().map_err(|_| AuthError::TokenInvalid)
    }

    /// Parse the role code
    pub fn user_role(&self) -> AuthResult<UserRole> {
        UserRole::from_code(&self.role).ok_or(AuthError::TokenInvalid)
    }
}

/// Stateless token issue/verify service
pub struct TokenService {
    secret: [u8; 32],
    ttl_secs: i64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            secret: config.token_secret,
            ttl_secs: config.token_ttl.as_secs() as i64,
        }
    }

    /// Issue a signed token for a principal
    pub fn issue(&self, user_id: &UserId, role: UserRole) -> String {
        self.issue_at(user_id, role, Utc::now())
    }

    pub(crate) fn issue_at(&self, user_id: &UserId, role: UserRole, now: DateTime<Utc>) -> String {
        let claims = Claims {
            sub: user_id.to_string(),
            role: role.code().to_string(),
            iat: now.timestamp(),
            exp: now.timestamp() + self.ttl_secs,
        };

        // Claims contain only strings and integers, serialization cannot fail
        let payload = serde_json::to_vec(&claims).expect("claims serialize");
        let payload_b64 = URL_SAFE_NO_PAD.encode(&payload);

        let mut mac = Hmac::<Sha256>::new_from_slice(&self.secret)
            .expect("HMAC can take key of any size");
        mac.update(payload_b64.as_bytes());
        let signature = mac.finalize().into_bytes();

        format!("{}.{}", payload_b64, URL_SAFE_NO_PAD.encode(signature))
    }

    /// Verify a token's signature and expiry, returning its claims
    ///
    /// Fails with `TokenInvalid` on format/signature problems and
    /// `TokenExpired` when past expiry. Does not consult any store.
    pub fn verify(&self, token: &str) -> AuthResult<Claims> {
        self.verify_at(token, Utc::now())
    }

    pub(crate) fn verify_at(&self, token: &str, now: DateTime<Utc>) -> AuthResult<Claims> {
        let (payload_b64, signature_b64) =
            token.split_once('.').ok_or(AuthError::TokenInvalid)?;

        if signature_b64.contains('.') {
            return Err(AuthError::TokenInvalid);
        }

        // Verify the signature before touching the payload
        let mut mac = Hmac::<Sha256>::new_from_slice(&self.secret)
            .expect("HMAC can take key of any size");
        mac.update(payload_b64.as_bytes());

        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| AuthError::TokenInvalid)?;

        mac.verify_slice(&signature)
            .map_err(|_| AuthError::TokenInvalid)?;

        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| AuthError::TokenInvalid)?;

        let claims: Claims =
            serde_json::from_slice(&payload).map_err(|_| AuthError::TokenInvalid)?;

        if now.timestamp() >= claims.exp {
            return Err(AuthError::TokenExpired);
        }

        Ok(claims)
    }
}
