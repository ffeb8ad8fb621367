//! Partitioning of a span batch by trace id.

use indexmap::IndexMap;
use spanmodel::{RawSpan, TraceId};

/// Groups spans by their trace id.
///
/// Spans keep their relative order within a group. Groups come out in the
/// order their trace id was first seen, but callers must not depend on that.
pub fn group_by_trace(spans: &[RawSpan]) -> IndexMap<TraceId, Vec<&RawSpan>> {
    let mut groups: IndexMap<TraceId, Vec<&RawSpan>> = IndexMap::new();
    for span in spans {
        groups.entry(span.trace_id()).or_default().push(span);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use spanmodel::{SpanContext, SpanId};

    fn span(trace: u8, span: u8) -> RawSpan {
        RawSpan {
            span_context: SpanContext::new(TraceId([trace; 16]), SpanId([span; 8])),
            ..Default::default()
        }
    }

    #[test]
    fn test_group_empty() {
        assert!(group_by_trace(&[]).is_empty());
    }

    #[test]
    fn test_group_preserves_order_within_trace() {
        let spans = vec![span(1, 1), span(2, 1), span(1, 2), span(1, 3), span(2, 2)];
        let groups = group_by_trace(&spans);

        assert_eq!(groups.len(), 2);
        let t1: Vec<_> = groups[&TraceId([1; 16])]
            .iter()
            .map(|s| s.span_id())
            .collect();
        assert_eq!(t1, vec![SpanId([1; 8]), SpanId([2; 8]), SpanId([3; 8])]);
        assert_eq!(groups[&TraceId([2; 16])].len(), 2);
    }

    proptest! {
        #[test]
        fn prop_grouping_is_a_partition(ids in prop::collection::vec((0u8..4, 0u8..=255), 0..40)) {
            let spans: Vec<_> = ids.iter().map(|&(t, s)| span(t, s)).collect();
            let groups = group_by_trace(&spans);

            let total: usize = groups.values().map(Vec::len).sum();
            prop_assert_eq!(total, spans.len());

            for (tid, group) in &groups {
                prop_assert!(!group.is_empty());
                prop_assert!(group.iter().all(|s| s.trace_id() == *tid));

                // Relative order within the group matches the input.
                let expected: Vec<_> = spans.iter().filter(|s| s.trace_id() == *tid).collect();
                prop_assert_eq!(group, &expected);
            }
        }
    }
}
