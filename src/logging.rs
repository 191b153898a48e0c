//! Diagnostic logging setup shared by both binaries.
//!
//! Logs go to stderr through `tracing-subscriber`, leaving stdout to the
//! user-facing messages from [`crate::output`]. `RUST_LOG` takes precedence;
//! otherwise only warnings are shown, or everything down to `debug` (full
//! tool command lines included) with `--verbose`.

use tracing_subscriber::EnvFilter;

/// Filter directive used when `RUST_LOG` is not set.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "warn,scant=debug" } else { "warn" }
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
