use crate::assemble::AssembleError;
use crate::context::ContextError;

/// Errors returned by [`SpanExporter::export`](crate::SpanExporter::export).
///
/// Every variant aborts the rest of the batch. Traces saved before the
/// error stay saved.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// A trace could not be assembled, e.g. it had more than one root span.
    #[error(transparent)]
    Assemble(#[from] AssembleError),

    /// The caller's context was canceled or its deadline passed.
    #[error(transparent)]
    Context(#[from] ContextError),

    /// The store rejected a save. The store's error is passed through as is.
    #[error(transparent)]
    Store(anyhow::Error),
}

impl ExportError {
    pub fn is_multiple_root_spans(&self) -> bool {
        matches!(
            self,
            ExportError::Assemble(AssembleError::MultipleRootSpans { .. })
        )
    }
}
