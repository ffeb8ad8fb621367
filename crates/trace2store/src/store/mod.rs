//! The persistence contract consumed by the exporter, and two stores.

use crate::context::Context;
use crate::document::TraceDocument;

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Durable storage for trace documents.
///
/// `save` may be called many times per export batch, once for each trace id,
/// and concurrently from overlapping batches. Implementations that need
/// per-trace atomicity must serialize saves themselves.
#[async_trait::async_trait]
pub trait TraceStore: Send + Sync {
    async fn save(&self, ctx: &Context, trace_id: &str, doc: TraceDocument) -> anyhow::Result<()>;
}
