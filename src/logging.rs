use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing with a compact stdout layer.
/// Default level: INFO, override via RUST_LOG env.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,decospace_lib=debug"));

    let stdout_layer = fmt::layer().with_target(true).compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .init();
}
