//! Tracing initialization and subscriber setup.

use super::exporter;
use crate::infrastructure::paths;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global tracing subscriber with file-based OTLP export.
///
/// Pipeline: `EnvFilter` (from `config.trace_level`, default `"info"`) →
/// OpenTelemetry layer → file exporter writing to
/// `<data_dir>/catalog-sync-otlp.json`.
///
/// Observability is optional: if the data directory cannot be created, nothing
/// is installed. Calling this more than once is harmless; only the first call
/// takes effect.
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");

    let data_dir = config.data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        opentelemetry::KeyValue::new("service.name", "catalog-sync"),
        opentelemetry::KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let provider = exporter::create_tracer_provider(paths::trace_file(&data_dir), resource);
    let tracer = provider.tracer(exporter::SCOPE_NAME);

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(OpenTelemetryLayer::new(tracer));

    let _ = subscriber.try_init();
}
