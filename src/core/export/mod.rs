//! Export orchestration
//!
//! This module provides the caller side of the feed pipeline:
//! - The pagination loop with page retries and graceful shutdown
//! - Record sinks
//! - Summary and reporting

pub mod coordinator;
pub mod sink;
pub mod summary;

pub use coordinator::{ExportCoordinator, ExportOptions};
pub use sink::{DiscardSink, JsonLinesSink, RecordSink, VecSink};
pub use summary::{ExportError, ExportErrorType, ExportSummary};
