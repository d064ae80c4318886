//! Domain entities

pub mod user;
