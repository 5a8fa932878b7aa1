//! Process-wide tracing setup shared by binaries and integration tests.

use tracing_subscriber::EnvFilter;

/// Initialize JSON logging for the process, filtered by `RUST_LOG` and
/// defaulting to `info`.
///
/// Safe to call multiple times; only the first call installs a subscriber.
pub fn init() {
    init_with_filter(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    );
}

/// Initialize with an explicit filter, bypassing the environment. Tests use
/// this to pin verbosity regardless of `RUST_LOG`.
pub fn init_with_filter(filter: EnvFilter) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_initialization_is_harmless() {
        init();
        init();
        init_with_filter(EnvFilter::new("debug"));
        tracing::info!("subscriber installed");
    }
}
