use tracing_subscriber::EnvFilter;

/// Sets up stderr logging. `RUST_LOG` takes precedence over `--verbose`.
pub fn init(verbose: bool) {
    let fallback = if verbose { "sitetheme=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
