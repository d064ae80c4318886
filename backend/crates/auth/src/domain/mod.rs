//! Domain layer: entities, value objects, repository traits

pub mod entity;
pub mod repository;
pub mod value_object;
