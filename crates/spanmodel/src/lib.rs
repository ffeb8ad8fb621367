//! Finished span records as handed over by an instrumentation layer.
//!
//! A [`RawSpan`] is read-only input: it is produced and owned by whatever
//! collects spans (an OpenTelemetry-style SDK, a test harness, ...) for the
//! duration of one export call. The `trace2store` crate turns batches of these
//! records into per-trace documents.
//!
//! # Usage
//!
//! ```
//! use spanmodel::{KeyValue, RawSpan, SpanContext, SpanId, SpanKind, TraceId};
//!
//! let trace_id: TraceId = "4bf92f3577b34da6a3ce929d0e0e4736".parse().unwrap();
//! let span_id: SpanId = "00f067aa0ba902b7".parse().unwrap();
//!
//! let span = RawSpan {
//!     span_context: SpanContext::new(trace_id, span_id),
//!     name: "checkout".to_string(),
//!     kind: SpanKind::Server,
//!     attributes: vec![KeyValue::string("http.route", "/checkout")],
//!     ..Default::default()
//! };
//! assert!(span.is_root());
//! ```

mod id;
pub mod types;

pub use id::{IdError, SpanId, TraceId};
pub use types::{
    Array, Event, InstrumentationLibrary, KeyValue, Link, RawSpan, SpanContext, SpanKind, Status,
    StatusCode, TraceFlags, Value,
};
