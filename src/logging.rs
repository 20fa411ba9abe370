// 📝 Logging - tracing subscriber setup for the binaries

use tracing_subscriber::EnvFilter;

/// Install a `fmt` subscriber on stderr, filtered by `RUST_LOG` (falls back
/// to `default_filter`). Later calls are no-ops.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
