//! OpenTelemetry tracing exported to a local file.
//!
//! ```text
//! tracing spans → tracing-opentelemetry → TraceFileExporter → zatlas-otlp.json
//! ```
//!
//! Each line of the trace file is one OTLP/JSON `resourceSpans` document. The
//! file rotates at 10 MB and keeps three numbered backups.
//!
//! The filter comes from `RUST_LOG` if set, otherwise from the plugin's
//! `trace_level` option (default `"info"`).

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, TRACE_FILE_NAME};
