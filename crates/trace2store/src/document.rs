//! Store-ready trace and span documents.
//!
//! Field names are persisted exactly as downstream readers of the store
//! expect them, which is why every struct carries explicit serde renames.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::attrs::Attributes;

/// A point in time as integer microseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Microseconds(pub i64);

/// The unit of persistence: every span of one trace, plus header fields
/// copied from the trace's root span.
///
/// When the group had no root span the header fields stay zero-valued.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TraceDocument {
    pub display_name: String,
    pub start_time: Microseconds,
    pub end_time: Microseconds,
    /// Spans keyed by their own span id.
    pub spans: BTreeMap<String, SpanData>,
}

impl TraceDocument {
    /// Reports whether the header fields were populated from a root span.
    pub fn has_root(&self) -> bool {
        self.spans.values().any(SpanData::is_root)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SpanData {
    #[serde(rename = "SpanID")]
    pub span_id: String,
    #[serde(rename = "TraceID")]
    pub trace_id: String,
    /// Empty for a root span.
    #[serde(rename = "ParentSpanID", default, skip_serializing_if = "String::is_empty")]
    pub parent_span_id: String,
    pub start_time: Microseconds,
    pub end_time: Microseconds,
    pub attributes: Attributes,
    pub display_name: String,
    #[serde(default)]
    pub links: Vec<Link>,
    pub instrumentation_library: InstrumentationLibrary,
    pub span_kind: String,
    pub same_process_as_parent_span: BoolValue,
    pub status: Status,
    #[serde(default)]
    pub time_events: TimeEvents,
}

impl SpanData {
    pub fn is_root(&self) -> bool {
        self.parent_span_id.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstrumentationLibrary {
    pub name: String,
    pub version: String,
    #[serde(rename = "SchemaURL", default, skip_serializing_if = "String::is_empty")]
    pub schema_url: String,
}

/// A boolean persisted as `{"Value": bool}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BoolValue {
    pub value: bool,
}

impl From<bool> for BoolValue {
    fn from(value: bool) -> Self {
        BoolValue { value }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Status {
    pub code: u32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Link {
    pub span_context: SpanContext,
    pub attributes: Attributes,
    pub dropped_attributes_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SpanContext {
    #[serde(rename = "TraceID")]
    pub trace_id: String,
    #[serde(rename = "SpanID")]
    pub span_id: String,
    pub is_remote: bool,
    pub trace_flags: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimeEvents {
    #[serde(default)]
    pub time_event: Vec<TimeEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimeEvent {
    pub time: Microseconds,
    pub annotation: Annotation,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Annotation {
    pub description: String,
    pub attributes: Attributes,
}
