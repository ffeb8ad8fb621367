use chrono::{DateTime, Utc};
use std::fmt;

use crate::id::{SpanId, TraceId};

// === Span context ===

/// Trace flags propagated with a span context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TraceFlags(pub u8);

impl TraceFlags {
    pub const SAMPLED: TraceFlags = TraceFlags(0x01);

    pub fn is_sampled(&self) -> bool {
        self.0 & Self::SAMPLED.0 != 0
    }
}

/// The identifying part of a span, shared by everything that refers to it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SpanContext {
    pub trace_id: TraceId,
    pub span_id: SpanId,
    pub trace_flags: TraceFlags,
    /// Whether the context was propagated from another process.
    pub is_remote: bool,
}

impl SpanContext {
    pub fn new(trace_id: TraceId, span_id: SpanId) -> Self {
        SpanContext {
            trace_id,
            span_id,
            trace_flags: TraceFlags::default(),
            is_remote: false,
        }
    }

    pub fn with_remote(self, is_remote: bool) -> Self {
        SpanContext { is_remote, ..self }
    }

    pub fn with_trace_flags(self, trace_flags: TraceFlags) -> Self {
        SpanContext {
            trace_flags,
            ..self
        }
    }

    pub fn has_span_id(&self) -> bool {
        self.span_id.is_valid()
    }

    pub fn is_valid(&self) -> bool {
        self.trace_id.is_valid() && self.span_id.is_valid()
    }
}

// === Attributes ===

/// A typed attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    I64(i64),
    F64(f64),
    String(String),
    Bytes(Vec<u8>),
    Array(Array),
}

/// A homogeneous list of attribute values.
#[derive(Debug, Clone, PartialEq)]
pub enum Array {
    Bool(Vec<bool>),
    I64(Vec<i64>),
    F64(Vec<f64>),
    String(Vec<String>),
}

/// A single attribute. Keys are not required to be unique within a list.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyValue {
    pub key: String,
    pub value: Value,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        KeyValue {
            key: key.into(),
            value,
        }
    }

    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, Value::String(value.into()))
    }

    pub fn i64(key: impl Into<String>, value: i64) -> Self {
        Self::new(key, Value::I64(value))
    }

    pub fn f64(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, Value::F64(value))
    }

    pub fn bool(key: impl Into<String>, value: bool) -> Self {
        Self::new(key, Value::Bool(value))
    }
}

// === Span kind and status ===

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SpanKind {
    Unspecified,
    #[default]
    Internal,
    Server,
    Client,
    Producer,
    Consumer,
}

impl SpanKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpanKind::Unspecified => "unspecified",
            SpanKind::Internal => "internal",
            SpanKind::Server => "server",
            SpanKind::Client => "client",
            SpanKind::Producer => "producer",
            SpanKind::Consumer => "consumer",
        }
    }
}

impl fmt::Display for SpanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum StatusCode {
    #[default]
    Unset = 0,
    Error = 1,
    Ok = 2,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Status {
    pub code: StatusCode,
    /// Only meaningful when `code` is `Error`.
    pub description: String,
}

impl Status {
    pub fn error(description: impl Into<String>) -> Self {
        Status {
            code: StatusCode::Error,
            description: description.into(),
        }
    }

    pub fn ok() -> Self {
        Status {
            code: StatusCode::Ok,
            description: String::new(),
        }
    }
}

// === Links and events ===

/// A reference from one span to another span's context.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Link {
    pub span_context: SpanContext,
    pub attributes: Vec<KeyValue>,
    /// Attributes discarded by the producer when the link was recorded.
    pub dropped_attribute_count: u32,
}

/// A named, timestamped annotation on a span.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Event {
    pub name: String,
    pub timestamp: DateTime<Utc>,
    pub attributes: Vec<KeyValue>,
}

/// Identifies the library that produced a span.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstrumentationLibrary {
    pub name: String,
    pub version: String,
    pub schema_url: String,
}

// === Spans ===

/// A completed span as produced by the instrumentation layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSpan {
    pub span_context: SpanContext,
    /// The parent's context. `None`, or a context without a span id, marks a root span.
    pub parent: Option<SpanContext>,
    pub name: String,
    pub kind: SpanKind,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub attributes: Vec<KeyValue>,
    pub links: Vec<Link>,
    pub events: Vec<Event>,
    pub status: Status,
    pub instrumentation_library: InstrumentationLibrary,
}

impl RawSpan {
    pub fn trace_id(&self) -> TraceId {
        self.span_context.trace_id
    }

    pub fn span_id(&self) -> SpanId {
        self.span_context.span_id
    }

    /// Returns the parent span id, if the parent context carries one.
    pub fn parent_span_id(&self) -> Option<SpanId> {
        self.parent
            .as_ref()
            .filter(|p| p.has_span_id())
            .map(|p| p.span_id)
    }

    pub fn is_root(&self) -> bool {
        self.parent_span_id().is_none()
    }
}
