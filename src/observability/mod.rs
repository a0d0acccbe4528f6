//! OpenTelemetry-based observability with file-based trace export.
//!
//! ```text
//! tracing → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → rotating JSON file
//! ```
//!
//! Spans cover event handling and every background request; request threads
//! attach the issuing span's context (see [`crate::worker::TraceContext`]), so a
//! search and the HTTP call it triggered share one trace.
//!
//! Trace level comes from the `trace_level` configuration option (default
//! `"info"`).

mod exporter;
mod file_writer;
mod init;

pub use init::init_tracing;
