use std::collections::HashMap;
use std::sync::RwLock;

use crate::context::Context;
use crate::document::TraceDocument;
use crate::store::TraceStore;

/// Keeps trace documents in memory. A save replaces any document previously
/// stored under the same trace id.
#[derive(Debug, Default)]
pub struct MemoryStore {
    traces: RwLock<HashMap<String, TraceDocument>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&self, trace_id: &str) -> Option<TraceDocument> {
        self.traces.read().unwrap().get(trace_id).cloned()
    }

    /// Returns the stored trace ids in sorted order.
    pub fn trace_ids(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.traces.read().unwrap().keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.traces.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait::async_trait]
impl TraceStore for MemoryStore {
    async fn save(&self, _ctx: &Context, trace_id: &str, doc: TraceDocument) -> anyhow::Result<()> {
        self.traces
            .write()
            .unwrap()
            .insert(trace_id.to_string(), doc);
        Ok(())
    }
}
