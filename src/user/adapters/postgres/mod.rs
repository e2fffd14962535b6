//! `PostgreSQL` adapters for user and follow persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresUserRepository;
