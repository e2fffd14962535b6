//! Manages the Warbler database schema.
//!
//! Usage:
//!
//! ```text
//! warbler_db <create-all|drop-all|reset>
//! ```
//!
//! The target database comes from `DATABASE_URL` (default
//! `postgresql:///warbler`). `create-all` creates any missing tables,
//! `drop-all` removes them, and `reset` deletes every row and restarts the
//! identity sequences.

use std::env;
use thiserror::Error;
use warbler::config::{ConfigError, WarblerConfig};
use warbler::database::{self, DatabaseError};

/// Errors that can occur while running a schema operation.
#[derive(Debug, Error)]
enum CommandError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

#[derive(Debug, Clone, Copy)]
enum Operation {
    CreateAll,
    DropAll,
    Reset,
}

impl Operation {
    fn parse(arg: &str) -> Result<Self, CommandError> {
        match arg {
            "create-all" => Ok(Self::CreateAll),
            "drop-all" => Ok(Self::DropAll),
            "reset" => Ok(Self::Reset),
            other => Err(CommandError::InvalidArgs(format!(
                "unknown operation '{other}'; expected create-all, drop-all, or reset"
            ))),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    warbler::telemetry::init();
    run(env::args().skip(1).collect()).map_err(|err| {
        tracing::error!(error = %err, "schema operation failed");
        Box::new(err) as Box<dyn std::error::Error + Send + Sync>
    })
}

fn run(args: Vec<String>) -> Result<(), CommandError> {
    let [arg] = args.as_slice() else {
        return Err(CommandError::InvalidArgs(format!(
            "expected exactly one operation, got {}",
            args.len()
        )));
    };
    let operation = Operation::parse(arg)?;

    let config = WarblerConfig::from_env()?;
    let pool = database::connect(&config.database)?;

    match operation {
        Operation::CreateAll => database::create_all(&pool)?,
        Operation::DropAll => database::drop_all(&pool)?,
        Operation::Reset => database::reset_tables(&pool)?,
    }
    tracing::info!(?operation, "schema operation complete");
    Ok(())
}
