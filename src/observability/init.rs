//! Subscriber setup: `tracing` spans → OpenTelemetry → trace file.

use super::file_writer::RotationPolicy;
use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVICE_NAME: &str = "zatlas";

/// File name of the trace output inside the data directory.
pub const TRACE_FILE_NAME: &str = "zatlas-otlp.json";

/// Installs the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `config.trace_level` is used as the
/// filter directive. Traces go to `~/.local/share/zellij/zatlas/zatlas-otlp.json`.
///
/// Tracing is best effort: if the data directory cannot be created, or a
/// subscriber is already installed, this returns without doing anything.
///
/// ```no_run
/// use zatlas::observability::init_tracing;
/// use zatlas::Config;
///
/// let config = Config {
///     trace_level: "debug".to_string(),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let data_dir = crate::infrastructure::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = tracer::trace_file_provider(
        data_dir.join(TRACE_FILE_NAME),
        resource,
        SERVICE_NAME,
        RotationPolicy::default(),
    );

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.trace_level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME)))
        .try_init();
}
