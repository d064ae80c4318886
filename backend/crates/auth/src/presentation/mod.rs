//! Presentation Layer
//!
//! HTTP handlers, DTOs, routers, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{AuthGateState, CurrentUser, require_admin, require_auth};
pub use router::{auth_router, auth_router_generic, users_router, users_router_generic};
