//! Warbler: the data-model layer of a small microblogging application.
//!
//! Users sign up with hashed passwords, follow each other, and post short
//! messages. Persistence goes through repository ports with `PostgreSQL`
//! (Diesel) and in-memory implementations.
//!
//! # Architecture
//!
//! Warbler follows hexagonal architecture principles:
//!
//! - **Domain**: Validated value types and aggregates with no infrastructure
//!   dependencies
//! - **Ports**: Abstract trait interfaces for persistence and hashing
//! - **Adapters**: Concrete implementations of ports (`PostgreSQL`, memory,
//!   Argon2)
//!
//! # Modules
//!
//! - [`user`]: Accounts, authentication, and the follow graph
//! - [`message`]: User-owned messages
//! - [`database`]: Connection pooling, schema management, in-memory store
//! - [`config`]: Environment-driven configuration
//! - [`telemetry`]: Logging setup

pub mod config;
pub mod database;
pub mod message;
pub mod telemetry;
pub mod user;
