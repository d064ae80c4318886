//! Infrastructure Layer

pub mod memory;
pub mod postgres;

pub use memory::InMemoryContactRepository;
pub use postgres::PgContactRepository;
