//! Diagnostic logging for the `userexit` binary.
//!
//! Logs go to stderr, alongside rendered exit messages, so the filter
//! defaults to `warn` and stays quiet on a normal run. `USEREXIT_LOG` takes
//! any `EnvFilter` directive, e.g. `USEREXIT_LOG=userexit=debug`.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "USEREXIT_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber.
///
/// A second call, or a subscriber installed by someone else, is left alone.
pub fn init() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .try_init();
}
