//! Logging init: structured events to stderr; stdout carries results.

use tracing_subscriber::EnvFilter;

/// Initialize logging to stderr. `RUST_LOG` takes precedence over `verbose`.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "info,pagetitle=debug"
    } else {
        "warn,pagetitle=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
