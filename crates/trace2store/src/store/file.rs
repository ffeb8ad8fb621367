use std::path::{Path, PathBuf};

use anyhow::Context as _;
use tokio::sync::Mutex;

use crate::context::Context;
use crate::document::TraceDocument;
use crate::store::TraceStore;

/// Stores each trace as a JSON file named after its trace id.
///
/// Saving onto an existing trace merges the two documents: incoming spans
/// replace stored spans with the same id, and the header fields are only
/// overwritten when the incoming document has a root span. An incoming root
/// with a different id replaces the stored root. Saves are serialized so
/// concurrent exports of one trace cannot lose spans.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    pub async fn open(dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("create trace store directory {}", dir.display()))?;
        Ok(FileStore {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Reads the document for `trace_id`, returning `None` if nothing has
    /// been saved for it.
    pub async fn load(&self, trace_id: &str) -> anyhow::Result<Option<TraceDocument>> {
        let path = self.trace_path(trace_id)?;
        let data = match tokio::fs::read(&path).await {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| format!("read trace {}", path.display()))
            }
        };
        let doc = serde_json::from_slice(&data)
            .with_context(|| format!("decode trace {}", path.display()))?;
        Ok(Some(doc))
    }

    fn trace_path(&self, trace_id: &str) -> anyhow::Result<PathBuf> {
        if !is_valid_trace_id(trace_id) {
            anyhow::bail!("invalid trace id {:?}", trace_id);
        }
        Ok(self.dir.join(format!("{trace_id}.json")))
    }
}

fn is_valid_trace_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Merges `incoming` into a stored document. A root span in `incoming`
/// replaces any differently-identified root already stored, so the merged
/// document keeps at most one parentless span.
fn merge(trace_id: &str, mut existing: TraceDocument, incoming: TraceDocument) -> TraceDocument {
    let incoming_root = incoming
        .spans
        .values()
        .find(|sd| sd.is_root())
        .map(|sd| sd.span_id.clone());

    if let Some(root_id) = incoming_root {
        existing.spans.retain(|id, sd| {
            let replaced = sd.is_root() && *id != root_id;
            if replaced {
                log::warn!(trace_id = trace_id, replaced = id.as_str(), root = root_id.as_str(); "replacing stored root span");
            }
            !replaced
        });
        existing.display_name = incoming.display_name;
        existing.start_time = incoming.start_time;
        existing.end_time = incoming.end_time;
    }
    existing.spans.extend(incoming.spans);
    existing
}

#[async_trait::async_trait]
impl TraceStore for FileStore {
    async fn save(&self, ctx: &Context, trace_id: &str, doc: TraceDocument) -> anyhow::Result<()> {
        let path = self.trace_path(trace_id)?;
        let _guard = self.write_lock.lock().await;
        ctx.check()?;

        let doc = match self.load(trace_id).await? {
            Some(existing) => merge(trace_id, existing, doc),
            None => doc,
        };

        let data = serde_json::to_vec(&doc).context("encode trace")?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &data)
            .await
            .with_context(|| format!("write trace {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .with_context(|| format!("rename trace into place {}", path.display()))?;

        log::trace!(trace_id = trace_id, spans = doc.spans.len(); "wrote trace file");
        Ok(())
    }
}
