//! API Client Library
//!
//! Rust client for the CRM auth and contacts API. Wraps `reqwest` with
//! the session and interceptor behavior the server expects:
//!
//! - a session store holding the principal and bearer token, optionally
//!   persisted between runs and expired client-side after a fixed window
//! - automatic token refresh on 401 with single-flight coordination, one
//!   replay, and forced logout when the refresh fails
//! - fixed-schedule retries for transient failures on idempotent calls

pub mod config;
pub mod dto;
pub mod error;
pub mod http;
pub mod refresh;
pub mod session;

pub use config::{ClientConfig, RetryConfig};
pub use error::{ClientError, ClientResult};
pub use http::ApiClient;
pub use session::{SessionStore, SessionUser};
