//! Domain layer: entities and the schema-validation pass

pub mod entities;
pub mod schema;
