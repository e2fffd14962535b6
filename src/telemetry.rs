//! Logging setup for binaries.

use tracing_subscriber::EnvFilter;

/// Directives used when `RUST_LOG` is unset or unparsable.
const DEFAULT_DIRECTIVES: &str = "info";

/// Installs a `tracing` subscriber that writes formatted events to stdout.
///
/// `RUST_LOG` takes full `EnvFilter` directives such as
/// `warbler=debug,diesel=warn`. Calling this more than once is harmless;
/// later calls leave the first subscriber in place.
pub fn init() {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    if tracing_subscriber::fmt()
        .with_env_filter(filter_from(directives.as_deref()))
        .with_target(false)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }
}

fn filter_from(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|value| !value.trim().is_empty())
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}
