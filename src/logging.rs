use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `debug` (from the settings file) lowers the
/// level to `debug` and lets `RUST_LOG` override it; otherwise `info` is forced.
pub fn init(debug: bool) {
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::new("info")
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
