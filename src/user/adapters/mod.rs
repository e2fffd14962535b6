//! Adapter implementations for user ports.
//!
//! The in-memory store backing every repository port lives in
//! [`crate::database::memory`].

pub mod hashing;
pub mod postgres;
