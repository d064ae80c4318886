//! Presentation Layer

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::ContactsAppState;
pub use router::{contacts_router, contacts_router_generic};
