//! Domain layer: entities and value objects with no I/O.

pub mod entities;
pub mod value_objects;
