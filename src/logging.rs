//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Filter used when neither an explicit filter nor `RUST_LOG` is set.
pub const DEFAULT_FILTER: &str = "warn";

/// Initialize tracing for the process.
///
/// Logs go to stderr so that reports on stdout stay clean. An explicit
/// `filter` wins over `RUST_LOG`. Safe to call multiple times (subsequent
/// calls are no-ops).
pub fn init(filter: Option<&str>) {
    let filter = match filter {
        Some(directives) => EnvFilter::try_new(directives).ok(),
        None => EnvFilter::try_from_default_env().ok(),
    }
    .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
