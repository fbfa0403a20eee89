//! Tracing subscriber setup.

use super::{tracer, SERVICE_NAME, TRACE_FILE_NAME};
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber: `EnvFilter` from `config.trace_level`
/// plus an OpenTelemetry layer exporting to `<data dir>/zlaunchpad-otlp.json`.
///
/// Tracing is best-effort. If the data directory cannot be created, or a
/// subscriber is already installed (the worker initialises its own thread
/// lazily), this returns `false` and the plugin runs untraced.
///
/// # Example
///
/// ```no_run
/// use zlaunchpad::observability::init_tracing;
/// use zlaunchpad::Config;
///
/// let config = Config {
///     trace_level: "zlaunchpad=debug".to_string(),
///     ..Config::default()
/// };
/// init_tracing(&config);
/// ```
pub fn init_tracing(config: &Config) -> bool {
    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return false;
    }

    let resource = Resource::new(vec![
        opentelemetry::KeyValue::new("service.name", SERVICE_NAME),
        opentelemetry::KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource, SERVICE_NAME);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    tracing_subscriber::registry()
        .with(filter(&config.trace_level))
        .with(otel_layer)
        .try_init()
        .is_ok()
}

/// Parses `level` as a filter directive, falling back to `info`.
fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_directives_fall_back_to_info() {
        assert_eq!(filter("zlaunchpad=loud").to_string(), "info");
        assert_eq!(filter("debug").to_string(), "debug");
    }
}
