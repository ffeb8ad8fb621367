use std::sync::Arc;

use spanmodel::RawSpan;

use crate::assemble::assemble_trace;
use crate::context::Context;
use crate::error::ExportError;
use crate::group::group_by_trace;
use crate::store::TraceStore;

/// Receives batches of finished spans from the instrumentation layer.
#[async_trait::async_trait]
pub trait SpanExporter: Send + Sync {
    async fn export(&self, ctx: &Context, spans: Vec<RawSpan>) -> Result<(), ExportError>;

    async fn shutdown(&self, ctx: &Context) -> Result<(), ExportError>;
}

/// A [`SpanExporter`] that writes each trace of a batch to a [`TraceStore`].
///
/// Exporting is not atomic across traces: when a batch fails part-way, the
/// traces saved before the failure remain saved and the remaining traces are
/// not attempted. Concurrent exports are not serialized, so two batches
/// carrying spans of the same trace race at the store.
#[derive(Clone)]
pub struct TraceStoreExporter {
    store: Arc<dyn TraceStore>,
}

impl TraceStoreExporter {
    pub fn new(store: Arc<dyn TraceStore>) -> Self {
        TraceStoreExporter { store }
    }
}

impl std::fmt::Debug for TraceStoreExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TraceStoreExporter").finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl SpanExporter for TraceStoreExporter {
    async fn export(&self, ctx: &Context, spans: Vec<RawSpan>) -> Result<(), ExportError> {
        let groups = group_by_trace(&spans);
        let total = groups.len();

        for (done, (tid, group)) in groups.into_iter().enumerate() {
            // Cancellation is only observed between traces.
            if let Some(err) = ctx.err() {
                log::warn!(saved = done, skipped = total - done; "trace export aborted: {}", err);
                return Err(err.into());
            }

            let trace_id = tid.to_string();
            let doc = assemble_trace(&group).map_err(|err| {
                log::warn!(trace_id = trace_id.as_str(), saved = done; "trace export aborted: {}", err);
                err
            })?;

            let span_count = doc.spans.len();
            self.store
                .save(ctx, &trace_id, doc)
                .await
                .map_err(|err| {
                    log::warn!(trace_id = trace_id.as_str(), saved = done; "saving trace failed: {:#}", err);
                    ExportError::Store(err)
                })?;

            log::debug!(trace_id = trace_id.as_str(), spans = span_count; "saved trace");
        }

        Ok(())
    }

    async fn shutdown(&self, _ctx: &Context) -> Result<(), ExportError> {
        Ok(())
    }
}
