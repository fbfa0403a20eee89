//! OpenTelemetry-based observability with file-based trace export.
//!
//! ```text
//! tracing → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON lines
//! ```
//!
//! - Traces go to `~/.local/share/zellij/zlaunchpad/zlaunchpad-otlp.json`
//!   (seen as `/host/...` from inside the sandbox)
//! - The file rotates at 5 MB, keeping two rotated files
//! - The filter comes from the `trace_level` plugin option (default `info`)
//!
//! Worker messages carry the sender's trace context, so spans recorded on the
//! worker thread appear under the plugin-side span that posted them.
//!
//! # Modules
//!
//! - [`init`]: subscriber setup
//! - [`tracer`]: tracer provider with file export
//! - [`span_formatter`]: OTLP JSON encoding
//! - [`file_writer`]: rotating file writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;

/// `service.name` resource attribute and instrumentation scope.
pub const SERVICE_NAME: &str = "zlaunchpad";

/// Trace file name inside the plugin data directory.
pub const TRACE_FILE_NAME: &str = "zlaunchpad-otlp.json";
