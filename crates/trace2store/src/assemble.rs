//! Assembly of one trace's spans into a [`TraceDocument`].

use spanmodel::RawSpan;

use crate::convert::convert_span;
use crate::document::TraceDocument;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssembleError {
    /// More than one span in the trace has no parent.
    #[error("trace {trace_id}: more than one parentless span ({first}, {second})")]
    MultipleRootSpans {
        trace_id: String,
        first: String,
        second: String,
    },
}

/// Converts every span of a single trace and builds its document.
///
/// The unique parentless span, if any, supplies the document's display name
/// and time window. A trace without a root is still assembled, with those
/// fields left zero-valued.
///
/// # Panics
///
/// Panics if `spans` is empty. Grouping never produces an empty group.
pub fn assemble_trace(spans: &[&RawSpan]) -> Result<TraceDocument, AssembleError> {
    assert!(!spans.is_empty(), "cannot assemble a trace from zero spans");

    let mut doc = TraceDocument::default();
    let mut root_id: Option<String> = None;

    for span in spans {
        let sd = convert_span(span);
        if sd.is_root() {
            if let Some(first) = &root_id {
                return Err(AssembleError::MultipleRootSpans {
                    trace_id: sd.trace_id,
                    first: first.clone(),
                    second: sd.span_id,
                });
            }
            doc.display_name = sd.display_name.clone();
            doc.start_time = sd.start_time;
            doc.end_time = sd.end_time;
            root_id = Some(sd.span_id.clone());
        }
        doc.spans.insert(sd.span_id.clone(), sd);
    }

    Ok(doc)
}
