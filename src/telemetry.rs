use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Registry;

/// Installs a console subscriber filtered by `RUST_LOG`, falling back to `default_level`.
/// Library code only emits events; binaries decide whether to call this.
pub fn init_telemetry(default_level: &str) {
    let registry = Registry::default()
        .with(EnvFilter::try_from_default_env().unwrap_or(EnvFilter::new(default_level)));

    registry
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
