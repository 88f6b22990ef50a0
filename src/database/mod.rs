pub mod manager;
pub mod models;
pub mod query_builder;
pub mod schema;

pub use manager::{ConstraintKind, Database, DatabaseError};
pub use schema::run_migrations;
