//! Tracer provider that exports spans to a local OTLP/JSON file.
//!
//! Plugins have no outbound collector to talk to, so spans are written next
//! to the favourites file and can be inspected offline.

use super::file_writer::{RotatingFile, RotationPolicy};
use super::span_formatter::OtlpEncoder;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;

/// `SpanExporter` writing one OTLP document per batch.
#[derive(Debug)]
struct TraceFileExporter {
    file: RotatingFile,
    encoder: OtlpEncoder,
    stopped: bool,
}

impl SpanExporter for TraceFileExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.stopped {
            Err(TraceError::from("trace file exporter stopped"))
        } else {
            let line = self.encoder.encode_batch(&batch).to_string();
            self.file
                .write_line(&line)
                .map_err(|e| TraceError::from(e.to_string()))
        };
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.stopped = true;
    }
}

/// Builds a provider that exports synchronously to `path`.
///
/// Uses the simple (unbatched) processor: the plugin runs single-threaded in
/// WASM with no background runtime to drive a batch exporter.
pub fn trace_file_provider(
    path: PathBuf,
    resource: Resource,
    scope: &'static str,
    policy: RotationPolicy,
) -> TracerProvider {
    let exporter = TraceFileExporter {
        file: RotatingFile::new(path, policy),
        encoder: OtlpEncoder::new(resource.clone(), scope),
        stopped: false,
    };

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::trace::{Tracer, TracerProvider as _};
    use opentelemetry::KeyValue;
    use tempfile::TempDir;

    #[test]
    fn finished_spans_land_in_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trace.json");
        let resource = Resource::new(vec![KeyValue::new("service.name", "zatlas")]);
        let provider = trace_file_provider(path.clone(), resource, "zatlas", RotationPolicy::default());

        provider.tracer("zatlas").in_span("fetch_countries", |_cx| {});

        let written = std::fs::read_to_string(path).unwrap();
        let doc: serde_json::Value = serde_json::from_str(written.lines().next().unwrap()).unwrap();
        assert_eq!(
            doc["resourceSpans"][0]["scopeSpans"][0]["spans"][0]["name"],
            "fetch_countries"
        );
    }
}
