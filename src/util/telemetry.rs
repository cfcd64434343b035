//! Telemetry helpers for structured logging and tracing.

/// Initialize tracing for the console and its utilities. Callers can install
/// their own subscriber first; this helper installs a default `RUST_LOG`-driven
/// subscriber only if none is set.
pub fn init_tracing() {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .try_init();
}

/// Like [`init_tracing`], but falls back to `default_directive` (for example
/// `"endpoint_tracker=info"`) when `RUST_LOG` is unset or invalid.
pub fn init_tracing_with_default(default_directive: &str) {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
