use std::env;

use tracing_subscriber::EnvFilter;

/// Filter directives, in `EnvFilter` syntax.
pub const LOG_ENV: &str = "SLOT_TRAMPOLINES_LOG";
pub const DEFAULT_FILTER: &str = "warn";

/// Installs a fmt subscriber for the registration-side events this crate
/// emits. Does nothing if a global subscriber is already set.
pub fn init() {
    let filter = match env::var(LOG_ENV) {
        Ok(directives) => EnvFilter::try_new(&directives).unwrap_or_else(|err| {
            eprintln!("ignoring {}={:?}: {}", LOG_ENV, directives, err);
            EnvFilter::new(DEFAULT_FILTER)
        }),
        Err(_) => EnvFilter::new(DEFAULT_FILTER),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
