//! Adapter implementations for message ports.
//!
//! The in-memory implementation lives in [`crate::database::memory`]
//! because it shares state with the user tables.

pub mod postgres;
