use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `QUIZ_LOG` wins over `RUST_LOG`; default is `info`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env("QUIZ_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
