//! Conversion from raw spans to store-ready span documents.

use chrono::{DateTime, Utc};
use spanmodel::{self as model, RawSpan};

use crate::attrs::normalize;
use crate::document::{
    Annotation, InstrumentationLibrary, Link, Microseconds, SpanContext, SpanData, Status,
    TimeEvent, TimeEvents,
};

/// Convert a raw span into its store representation.
///
/// The parent span id is only set when the parent context carries a span id;
/// an empty parent span id is what marks a span as the root of its trace.
pub fn convert_span(span: &RawSpan) -> SpanData {
    let sc = &span.span_context;
    SpanData {
        span_id: sc.span_id.to_string(),
        trace_id: sc.trace_id.to_string(),
        parent_span_id: span
            .parent_span_id()
            .map(|id| id.to_string())
            .unwrap_or_default(),
        start_time: time_to_micros(&span.start_time),
        end_time: time_to_micros(&span.end_time),
        attributes: normalize(&span.attributes),
        display_name: span.name.clone(),
        links: convert_links(&span.links),
        instrumentation_library: convert_library(&span.instrumentation_library),
        span_kind: span.kind.to_string(),
        same_process_as_parent_span: (!sc.is_remote).into(),
        status: convert_status(&span.status),
        time_events: TimeEvents {
            time_event: convert_events(&span.events),
        },
    }
}

// ============================================================
// Field conversions
// ============================================================

pub fn time_to_micros(t: &DateTime<Utc>) -> Microseconds {
    Microseconds(t.timestamp_micros())
}

pub fn convert_links(links: &[model::Link]) -> Vec<Link> {
    links
        .iter()
        .map(|l| Link {
            span_context: convert_span_context(&l.span_context),
            attributes: normalize(&l.attributes),
            dropped_attributes_count: l.dropped_attribute_count,
        })
        .collect()
}

pub fn convert_span_context(sc: &model::SpanContext) -> SpanContext {
    SpanContext {
        trace_id: sc.trace_id.to_string(),
        span_id: sc.span_id.to_string(),
        is_remote: sc.is_remote,
        trace_flags: sc.trace_flags.0,
    }
}

pub fn convert_events(events: &[model::Event]) -> Vec<TimeEvent> {
    events
        .iter()
        .map(|e| TimeEvent {
            time: time_to_micros(&e.timestamp),
            annotation: Annotation {
                description: e.name.clone(),
                attributes: normalize(&e.attributes),
            },
        })
        .collect()
}

pub fn convert_status(status: &model::Status) -> Status {
    Status {
        code: status.code as u32,
        description: status.description.clone(),
    }
}

fn convert_library(lib: &model::InstrumentationLibrary) -> InstrumentationLibrary {
    InstrumentationLibrary {
        name: lib.name.clone(),
        version: lib.version.clone(),
        schema_url: lib.schema_url.clone(),
    }
}
