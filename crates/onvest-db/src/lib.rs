//! ONVEST Database — SurrealDB persistence layer.
//!
//! Provides connection management, schema migrations, and the
//! SurrealDB implementations of the repository traits defined in
//! `onvest-core`.

pub mod connection;
pub mod error;
pub mod repository;
pub mod schema;

pub use connection::{DbConfig, DbManager};
pub use error::DbError;
pub use schema::run_migrations;
