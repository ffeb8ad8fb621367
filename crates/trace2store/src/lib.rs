//! Converts batches of finished spans into per-trace documents and saves
//! them to a [`TraceStore`].
//!
//! The pipeline for one [`SpanExporter::export`] call:
//!
//! 1. [`group_by_trace`] partitions the batch by trace id.
//! 2. For each trace, [`assemble_trace`] converts every span with
//!    [`convert_span`] and builds a [`TraceDocument`] headed by the trace's
//!    unique root span.
//! 3. The document is handed to [`TraceStore::save`].
//!
//! The first error aborts the batch; traces already saved stay saved.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use spanmodel::{RawSpan, SpanContext, SpanId, TraceId};
//! use trace2store::{Context, MemoryStore, SpanExporter, TraceStoreExporter};
//!
//! # tokio_test_block_on(async {
//! let store = Arc::new(MemoryStore::new());
//! let exporter = TraceStoreExporter::new(store.clone());
//!
//! let root = RawSpan {
//!     span_context: SpanContext::new(TraceId([1; 16]), SpanId([1; 8])),
//!     name: "root".to_string(),
//!     ..Default::default()
//! };
//! exporter.export(&Context::background(), vec![root]).await.unwrap();
//!
//! let doc = store.load(&TraceId([1; 16]).to_string()).unwrap();
//! assert_eq!(doc.display_name, "root");
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

pub mod assemble;
pub mod attrs;
pub mod config;
pub mod context;
pub mod convert;
pub mod document;
mod error;
pub mod exporter;
pub mod group;
pub mod store;

pub use assemble::{assemble_trace, AssembleError};
pub use attrs::{normalize, AttributeValue, Attributes};
pub use config::{ConfigError, ExporterConfig, StoreConfig};
pub use context::{Context, ContextError};
pub use convert::convert_span;
pub use document::{Microseconds, SpanData, TraceDocument};
pub use error::ExportError;
pub use exporter::{SpanExporter, TraceStoreExporter};
pub use group::group_by_trace;
pub use store::{FileStore, MemoryStore, TraceStore};
