//! Contacts Backend Module
//!
//! CRM contact records behind the auth gate:
//! - `domain/` - Contact entity and repository trait
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router

pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use error::{ContactError, ContactResult};
pub use infra::postgres::PgContactRepository;
pub use presentation::router::contacts_router;
