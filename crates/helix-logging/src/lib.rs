//! Logging setup for Helix binaries.
//!
//! Library crates only emit `tracing` events; a binary calls [`init`] once
//! to install a formatted subscriber filtered by `HELIX_LOG`, falling back to
//! `RUST_LOG` and then to the binary's default directive.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use tracing_subscriber::util::TryInitError;

/// Primary filter variable.
pub const LOG_ENV: &str = "HELIX_LOG";

/// Install the global subscriber, ignoring a second call.
pub fn init(default_filter: &str) {
    let _ = try_init(default_filter);
}

/// Install the global subscriber.
pub fn try_init(default_filter: &str) -> Result<(), TryInitError> {
    let filter = filter_from(
        std::env::var(LOG_ENV)
            .or_else(|_| std::env::var(EnvFilter::DEFAULT_ENV))
            .ok()
            .as_deref(),
        default_filter,
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    tracing::debug!("logging initialised");
    Ok(())
}

/// Parse `directives`, or `default_filter` when unset or malformed.
fn filter_from(directives: Option<&str>, default_filter: &str) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(default_filter))
}
